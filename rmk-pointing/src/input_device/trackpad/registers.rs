//! Cirque Pinnacle register map

// ============================================================================
// Command masks
// ============================================================================
pub(crate) const MASK_READ: u8 = 0xa0;
pub(crate) const MASK_WRITE: u8 = 0x80;

// ============================================================================
// Direct registers
// ============================================================================
pub(crate) const REG_FW_ID: u8 = 0x00;
pub(crate) const REG_STATUS: u8 = 0x02;
pub(crate) const REG_SYS_CFG: u8 = 0x03;
pub(crate) const REG_FEED_CFG1: u8 = 0x04;
pub(crate) const REG_FEED_CFG2: u8 = 0x05;
pub(crate) const REG_FEED_CFG3: u8 = 0x06;
pub(crate) const REG_CAL_CFG: u8 = 0x07;
pub(crate) const REG_DATA: u8 = 0x12;

// ============================================================================
// Extended register access
// ============================================================================
// The value register shares its address with ADDR_HIGH on the firmware this driver
// was brought up against. Keep it in sync with the device, not with the datasheet.
pub(crate) const EXT_REG_AXS_VALUE: u8 = 0x1c;
pub(crate) const EXT_REG_AXS_ADDR_HIGH: u8 = 0x1c;
pub(crate) const EXT_REG_AXS_ADDR_LOW: u8 = 0x1d;
pub(crate) const EXT_REG_AXS_CTRL: u8 = 0x1e;

pub(crate) const EXT_REG_ADCCONFIG: u16 = 0x0187;

pub(crate) const EREG_AXS_READ: u8 = 0x01;
pub(crate) const EREG_AXS_WRITE: u8 = 0x02;
pub(crate) const EREG_AXS_INC_ADDR_READ: u8 = 0x04;

pub(crate) const EREG_ADCCONFIG_ADC_ATTENUATE_MASK: u8 = 0xc2;

// ============================================================================
// Register values
// ============================================================================
pub(crate) const FW_ID_EXPECTED: [u8; 2] = [0x07, 0x3a];

pub(crate) const SYS_CFG_NORMAL: u8 = 0x00;
pub(crate) const SYS_CFG_RESET: u8 = 0x01;
pub(crate) const SYS_CFG_LOW_POWER: u8 = 0x04;

pub(crate) const CAL_CFG_CALIBRATE: u8 = 0x01;

pub(crate) const FEED1_ENABLE: u8 = 0x01;
pub(crate) const FEED1_ABSOLUTE: u8 = 0x02;
pub(crate) const FEED1_NO_FILTER: u8 = 0x04;
pub(crate) const FEED1_INVERT_X: u8 = 0x40;

pub(crate) const FEED2_INTELLIMOUSE: u8 = 0x01;
pub(crate) const FEED2_NO_SEC_TAPS: u8 = 0x04;
pub(crate) const FEED2_NO_SCROLL: u8 = 0x08;
pub(crate) const FEED2_NO_GLIDEEXTEND: u8 = 0x10;

pub(crate) const FEED3_DISABLE_CROSS_RATE_SMOOTHING: u8 = 0x02;

// ============================================================================
// Timing
// ============================================================================
pub(crate) const RESET_DELAY_MS: u32 = 30;
pub(crate) const CALIBRATE_DELAY_MS: u32 = 200;
pub(crate) const EXT_REG_DELAY_MS: u32 = 21;

/// Length of a data report
pub const REPORT_LEN: usize = 6;
