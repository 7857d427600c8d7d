//! Static configuration of the pointing device modules

use embassy_time::Duration;

/// Default I2C address of the AS5013 analog position sensor
pub const ANALOG_SENSOR_ADDRESS: u8 = 0x40;
/// Alternate I2C address of the AS5013, selected by its address pin
pub const ANALOG_SENSOR_ALT_ADDRESS: u8 = 0x41;
/// I2C address of the Cirque Pinnacle trackpad
pub const TRACKPAD_ADDRESS: u8 = 0x2a;

/// Configuration of [`crate::input_device::analog_sensor::PollingAnalogSensor`]
#[derive(Clone, Debug)]
pub struct AnalogSensorConfig {
    /// I2C address of the sensor
    pub address: u8,
    /// Raw reading of the X axis at rest, subtracted from every sample
    pub x_offset: i16,
    /// Raw reading of the Y axis at rest, subtracted from every sample
    pub y_offset: i16,
    /// Deadzone half-width of the X axis
    pub dead_x: i16,
    /// Deadzone half-width of the Y axis
    pub dead_y: i16,
    /// Invert X axis
    pub invert_x: bool,
    /// Invert Y axis
    pub invert_y: bool,
    /// Minimum time between two sensor reads
    pub polling_interval: Duration,
    /// Log every raw reading
    pub debug: bool,
}

impl Default for AnalogSensorConfig {
    fn default() -> Self {
        Self {
            address: ANALOG_SENSOR_ADDRESS,
            x_offset: 7,
            y_offset: 17,
            dead_x: 5,
            dead_y: 5,
            invert_x: false,
            invert_y: false,
            polling_interval: Duration::from_millis(20),
            debug: false,
        }
    }
}

/// ADC attenuation of the trackpad sensor.
///
/// Higher attenuation lowers the sensitivity, which is needed behind thicker overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcAttenuation {
    X1,
    X2,
    X3,
    X4,
}

impl AdcAttenuation {
    /// Bits of the ADC config register selecting this attenuation
    pub fn bits(self) -> u8 {
        match self {
            AdcAttenuation::X1 => 0x00,
            AdcAttenuation::X2 => 0x40,
            AdcAttenuation::X3 => 0x80,
            AdcAttenuation::X4 => 0xc0,
        }
    }
}

/// Configuration of [`crate::input_device::trackpad::TrackpadDriver`]
#[derive(Clone, Debug)]
pub struct TrackpadConfig {
    /// I2C address of the trackpad
    pub address: u8,
    /// ADC attenuation applied during bring-up
    pub attenuation: AdcAttenuation,
    /// Log every decoded report
    pub debug: bool,
}

impl Default for TrackpadConfig {
    fn default() -> Self {
        Self {
            address: TRACKPAD_ADDRESS,
            attenuation: AdcAttenuation::X4,
            debug: false,
        }
    }
}
