//! AS5013 analog position sensor ("easypoint") driver.
//!
//! The sensor reports the stick position as two 8-bit registers. The driver polls them at a
//! fixed interval and turns the reading into relative motion: offset correction, optional axis
//! inversion and a deadzone which suppresses resting noise.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant};
use embedded_hal_async::i2c::I2c;

use crate::bus::{BusDevice, BusError, SharedBus};
use crate::config::AnalogSensorConfig;
use crate::debug_log::DebugLog;
use crate::event::{EventSink, MotionSample, PointerEvent};
use crate::module::ScanModule;

// X position register, Y_RES_INT follows it and is read in the same transfer
const AS5013_X: u8 = 0x10;
const POSITION_LEN: usize = 2;

/// Convert a raw position byte to a signed value.
///
/// Bytes with the high bit set map to `byte - 255`, which is one off from two's complement.
/// Stick offsets are calibrated against this conversion, so it must stay as is.
pub fn decode_signed(byte: u8) -> i16 {
    let value = byte as i16;
    if byte & 0x80 != 0 { value - 0xff } else { value }
}

/// Polling driver of an AS5013 analog stick on a shared bus
pub struct PollingAnalogSensor<'a, M: RawMutex, BUS> {
    device: BusDevice<'a, M, BUS>,
    config: AnalogSensorConfig,
    last_poll: Instant,
    log: DebugLog,
}

impl<'a, M: RawMutex, BUS: I2c> PollingAnalogSensor<'a, M, BUS> {
    pub fn new(bus: &'a SharedBus<M, BUS>, config: AnalogSensorConfig) -> Self {
        let log = DebugLog::new("easypoint", config.debug);
        Self::with_log(bus, config, log)
    }

    pub fn with_log(bus: &'a SharedBus<M, BUS>, config: AnalogSensorConfig, log: DebugLog) -> Self {
        Self {
            device: BusDevice::new(bus, config.address),
            config,
            last_poll: Instant::MIN,
            log,
        }
    }

    pub fn last_poll(&self) -> Instant {
        self.last_poll
    }

    fn poll_due(&self, now: Instant) -> bool {
        now.checked_duration_since(self.last_poll)
            .is_some_and(|elapsed| elapsed >= self.config.polling_interval)
    }

    async fn read_raw_state(&mut self) -> Result<(u8, u8), BusError> {
        let mut buf = [0u8; POSITION_LEN];
        self.device.write_then_read(&[AS5013_X], &mut buf).await?;
        Ok((buf[0], buf[1]))
    }

    /// Apply offset, inversion and deadzone to a raw reading.
    ///
    /// Returns `None` when both axes are inside the deadzone.
    pub fn process_reading(&self, raw_x: u8, raw_y: u8) -> Option<MotionSample> {
        let mut dx = decode_signed(raw_x) - self.config.x_offset;
        let mut dy = decode_signed(raw_y) - self.config.y_offset;

        if self.config.invert_x {
            dx = -dx;
        }
        if self.config.invert_y {
            dy = -dy;
        }

        if dx.abs() > self.config.dead_x || dy.abs() > self.config.dead_y {
            Some(MotionSample { dx, dy })
        } else {
            None
        }
    }

    pub fn polling_interval(&self) -> Duration {
        self.config.polling_interval
    }
}

impl<M: RawMutex, BUS: I2c> ScanModule for PollingAnalogSensor<'_, M, BUS> {
    type Error = BusError;

    async fn on_pre_scan(&mut self, now: Instant, events: &mut impl EventSink) -> Result<(), Self::Error> {
        if !self.poll_due(now) {
            return Ok(());
        }
        self.last_poll = now;

        let (raw_x, raw_y) = self.read_raw_state().await?;
        if self.log.enabled() {
            debug!("{}: raw x: {}, raw y: {}", self.log.name(), raw_x, raw_y);
        }

        if let Some(motion) = self.process_reading(raw_x, raw_y) {
            events.push(PointerEvent::Motion(motion));
        }
        Ok(())
    }
}
