//! Cirque Pinnacle capacitive trackpad ("glidepoint") driver.
//!
//! Bring-up runs once in [`ScanModule::on_bootup`]: firmware identification, software reset,
//! feed configuration, ADC attenuation, calibration and finally enabling the feed. After
//! that, every scan checks the status register and decodes a report when one is ready.
//!
//! Registers outside of the primary register space are reached through the extended
//! register access protocol, see [`TrackpadDriver::read_extended`] and
//! [`TrackpadDriver::write_extended`].

pub mod handler;
mod registers;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use self::handler::{RelativeHandler, ReportHandler};
pub use self::registers::REPORT_LEN;
use self::registers::*;
use crate::bus::{BusDevice, BusError, SharedBus};
use crate::config::{AdcAttenuation, TrackpadConfig};
use crate::debug_log::DebugLog;
use crate::event::EventSink;
use crate::module::ScanModule;

/// Trackpad error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackpadError {
    /// Bus communication error
    Bus(BusError),
    /// Firmware ID read during bring-up doesn't match the supported chip
    FirmwareMismatch([u8; 2]),
}

impl From<BusError> for TrackpadError {
    fn from(err: BusError) -> Self {
        TrackpadError::Bus(err)
    }
}

/// Bring-up progress of the trackpad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackpadState {
    Uninitialized,
    Resetting,
    Configuring,
    Calibrating,
    FeedEnabled,
    /// Bring-up aborted, the trackpad is ignored from now on
    Failed,
}

/// Result of one steady-state poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No data ready
    Idle,
    /// A report was read and handed to the report handler
    Decoded,
}

/// Cirque Pinnacle driver on a shared bus
pub struct TrackpadDriver<'a, M: RawMutex, BUS, D, H = RelativeHandler> {
    device: BusDevice<'a, M, BUS>,
    delay: D,
    handler: H,
    config: TrackpadConfig,
    state: TrackpadState,
    log: DebugLog,
}

impl<'a, M, BUS, D, H> TrackpadDriver<'a, M, BUS, D, H>
where
    M: RawMutex,
    BUS: I2c,
    D: DelayNs,
    H: ReportHandler,
{
    pub fn new(bus: &'a SharedBus<M, BUS>, delay: D, handler: H, config: TrackpadConfig) -> Self {
        let log = DebugLog::new("glidepoint", config.debug);
        Self::with_log(bus, delay, handler, config, log)
    }

    pub fn with_log(bus: &'a SharedBus<M, BUS>, delay: D, handler: H, config: TrackpadConfig, log: DebugLog) -> Self {
        Self {
            device: BusDevice::new(bus, config.address),
            delay,
            handler,
            config,
            state: TrackpadState::Uninitialized,
            log,
        }
    }

    pub fn state(&self) -> TrackpadState {
        self.state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    async fn read_register(&self, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.device.write_then_read(&[reg | MASK_READ], buf).await
    }

    async fn read_byte(&self, reg: u8) -> Result<u8, BusError> {
        let mut buf = [0u8];
        self.read_register(reg, &mut buf).await?;
        Ok(buf[0])
    }

    async fn write_register(&self, reg: u8, value: u8) -> Result<(), BusError> {
        self.device.write(&[reg | MASK_WRITE, value]).await
    }

    async fn clear_flags(&self) -> Result<(), BusError> {
        self.write_register(REG_STATUS, 0x00).await
    }

    async fn enable_feed(&self, enable: bool) -> Result<(), BusError> {
        let feed = self.read_byte(REG_FEED_CFG1).await?;
        if enable {
            self.write_register(REG_FEED_CFG1, feed | FEED1_ENABLE).await
        } else {
            self.write_register(REG_FEED_CFG1, feed & !FEED1_ENABLE).await
        }
    }

    /// Read `buf.len()` bytes starting at extended register `address`.
    ///
    /// Disables the feed, the caller is responsible for enabling it again.
    pub async fn read_extended(&mut self, address: u16, buf: &mut [u8]) -> Result<(), BusError> {
        self.enable_feed(false).await?;
        self.write_register(EXT_REG_AXS_ADDR_HIGH, (address >> 8) as u8).await?;
        self.write_register(EXT_REG_AXS_ADDR_LOW, (address & 0xff) as u8).await?;

        // The chip increments the address after every byte
        for byte in buf.iter_mut() {
            self.write_register(EXT_REG_AXS_CTRL, EREG_AXS_INC_ADDR_READ | EREG_AXS_READ)
                .await?;
            self.delay.delay_ms(EXT_REG_DELAY_MS).await;
            *byte = self.read_byte(EXT_REG_AXS_VALUE).await?;
        }

        self.clear_flags().await
    }

    /// Write `data` to extended register `address`.
    ///
    /// Disables the feed, the caller is responsible for enabling it again.
    pub async fn write_extended(&mut self, address: u16, data: u8) -> Result<(), BusError> {
        self.enable_feed(false).await?;
        self.write_register(EXT_REG_AXS_VALUE, data).await?;
        self.write_register(EXT_REG_AXS_ADDR_HIGH, (address >> 8) as u8).await?;
        self.write_register(EXT_REG_AXS_ADDR_LOW, (address & 0xff) as u8).await?;
        self.write_register(EXT_REG_AXS_CTRL, EREG_AXS_WRITE).await?;
        self.delay.delay_ms(EXT_REG_DELAY_MS).await;
        self.clear_flags().await
    }

    async fn verify_firmware(&self) -> Result<(), TrackpadError> {
        let mut fw_id = [0u8; 2];
        self.read_register(REG_FW_ID, &mut fw_id).await?;
        if fw_id != FW_ID_EXPECTED {
            error!("Trackpad firmware ID mismatch: {:#02x} {:#02x}", fw_id[0], fw_id[1]);
            return Err(TrackpadError::FirmwareMismatch(fw_id));
        }
        debug!("Trackpad firmware ID: {:#02x} {:#02x}", fw_id[0], fw_id[1]);
        Ok(())
    }

    async fn configure(&self) -> Result<(), BusError> {
        for &(reg, value) in self.handler.feed_config() {
            self.write_register(reg, value).await?;
        }
        Ok(())
    }

    /// Set the ADC attenuation.
    ///
    /// Returns `false` without writing anything if the attenuation is already set.
    pub async fn set_adc_attenuation(&mut self, attenuation: AdcAttenuation) -> Result<bool, BusError> {
        let mut adc_config = [0u8];
        self.read_extended(EXT_REG_ADCCONFIG, &mut adc_config).await?;
        let current = adc_config[0];

        let gain = attenuation.bits() & EREG_ADCCONFIG_ADC_ATTENUATE_MASK;
        if gain == current & EREG_ADCCONFIG_ADC_ATTENUATE_MASK {
            debug!("Trackpad ADC attenuation already {:?}", attenuation);
            return Ok(false);
        }

        let value = (current & !EREG_ADCCONFIG_ADC_ATTENUATE_MASK) | gain;
        self.write_extended(EXT_REG_ADCCONFIG, value).await?;
        debug!("Trackpad ADC attenuation set to {:?}", attenuation);
        Ok(true)
    }

    async fn calibrate(&mut self) -> Result<(), BusError> {
        let cal = self.read_byte(REG_CAL_CFG).await?;
        self.write_register(REG_CAL_CFG, cal | CAL_CFG_CALIBRATE).await?;
        self.delay.delay_ms(CALIBRATE_DELAY_MS).await;
        self.clear_flags().await
    }

    /// Enable or disable the cross-rate cursor smoothing of the trackpad
    pub async fn set_cursor_smoothing(&self, enable: bool) -> Result<(), BusError> {
        let feed = self.read_byte(REG_FEED_CFG3).await?;
        if enable {
            self.write_register(REG_FEED_CFG3, feed & !FEED3_DISABLE_CROSS_RATE_SMOOTHING)
                .await
        } else {
            self.write_register(REG_FEED_CFG3, feed | FEED3_DISABLE_CROSS_RATE_SMOOTHING)
                .await
        }
    }

    async fn bring_up(&mut self) -> Result<(), TrackpadError> {
        self.verify_firmware().await?;

        self.state = TrackpadState::Resetting;
        self.write_register(REG_SYS_CFG, SYS_CFG_RESET).await?;
        self.delay.delay_ms(RESET_DELAY_MS).await;
        self.clear_flags().await?;

        self.state = TrackpadState::Configuring;
        self.configure().await?;
        self.set_adc_attenuation(self.config.attenuation).await?;

        self.state = TrackpadState::Calibrating;
        self.calibrate().await?;

        self.enable_feed(true).await?;
        Ok(())
    }

    async fn data_ready(&self) -> Result<bool, BusError> {
        Ok(self.read_byte(REG_STATUS).await? != 0x00)
    }

    /// Check for a pending report and decode it.
    pub async fn poll_report(&mut self, events: &mut impl EventSink) -> Result<PollOutcome, BusError> {
        if !self.data_ready().await? {
            return Ok(PollOutcome::Idle);
        }

        let mut report = [0u8; REPORT_LEN];
        self.read_register(REG_DATA, &mut report).await?;
        self.handler.decode(&report, events, &self.log);
        self.clear_flags().await?;

        Ok(PollOutcome::Decoded)
    }
}

impl<M, BUS, D, H> ScanModule for TrackpadDriver<'_, M, BUS, D, H>
where
    M: RawMutex,
    BUS: I2c,
    D: DelayNs,
    H: ReportHandler,
{
    type Error = TrackpadError;

    async fn on_bootup(&mut self) -> Result<(), Self::Error> {
        info!("Trackpad at {:#02x}: bringing up", self.device.address());
        match self.bring_up().await {
            Ok(()) => {
                self.state = TrackpadState::FeedEnabled;
                info!("Trackpad at {:#02x}: feed enabled", self.device.address());
                Ok(())
            }
            Err(e) => {
                error!("Trackpad bring-up failed in {:?}: {:?}", self.state, e);
                self.state = TrackpadState::Failed;
                Err(e)
            }
        }
    }

    async fn on_post_scan(&mut self, events: &mut impl EventSink) -> Result<(), Self::Error> {
        if self.state != TrackpadState::FeedEnabled {
            return Ok(());
        }
        self.poll_report(events).await?;
        Ok(())
    }

    async fn on_powersave_enable(&mut self) -> Result<(), Self::Error> {
        self.write_register(REG_SYS_CFG, SYS_CFG_LOW_POWER).await?;
        Ok(())
    }

    async fn on_powersave_disable(&mut self) -> Result<(), Self::Error> {
        self.write_register(REG_SYS_CFG, SYS_CFG_NORMAL).await?;
        Ok(())
    }
}
