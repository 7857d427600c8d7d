//! Pointing device modules for RMK scan loops.
//!
//! Two drivers feed pointer motion and button taps into the keyboard's event stream:
//!
//! - [`input_device::analog_sensor::PollingAnalogSensor`]: AS5013 analog stick, polled at a fixed interval
//! - [`input_device::trackpad::TrackpadDriver`]: Cirque Pinnacle capacitive trackpad
//!
//! Both implement the [`module::ScanModule`] lifecycle and share I2C buses through [`bus::SharedBus`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bus;
pub mod config;
pub mod debug_log;
pub mod event;
pub mod input_device;
pub mod module;

pub use bus::{BusDevice, BusError, BusTransaction, SharedBus};
pub use debug_log::DebugLog;
pub use event::{EventSink, MotionSample, MouseButton, PointerEvent};
pub use module::{ScanModule, scan_tick};
