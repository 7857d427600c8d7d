//! Pointing device modules
//!
//! Every device here implements [`crate::module::ScanModule`] and talks to its peripheral
//! through a [`crate::bus::SharedBus`], so several of them can live on one I2C bus.

pub mod analog_sensor;
pub mod trackpad;
