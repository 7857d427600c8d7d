//! Decoders of the trackpad data report.
//!
//! The trackpad reports either relative (PS/2 style) or absolute data depending on its feed
//! configuration, so every handler also provides the feed configuration it expects.

use super::registers::*;
use crate::debug_log::DebugLog;
use crate::event::{EventSink, MotionSample, MouseButton, PointerEvent};

const BUTTON_MASK: u8 = 0b0000_0111;
const BUTTON_PRIMARY: u8 = 0b0000_0001;
const X_SIGN: u8 = 0b0001_0000;
const Y_SIGN: u8 = 0b0010_0000;

const RELATIVE_FEED_CONFIG: [(u8, u8); 2] = [
    (
        REG_FEED_CFG2,
        FEED2_NO_GLIDEEXTEND | FEED2_INTELLIMOUSE | FEED2_NO_SEC_TAPS | FEED2_NO_SCROLL,
    ),
    (REG_FEED_CFG1, 0x00),
];

const ABSOLUTE_FEED_CONFIG: [(u8, u8); 2] = [
    (REG_FEED_CFG2, 0x00),
    (
        REG_FEED_CFG1,
        FEED1_ENABLE | FEED1_NO_FILTER | FEED1_ABSOLUTE | FEED1_INVERT_X,
    ),
];

/// Decoder of the 6-byte trackpad report
pub trait ReportHandler {
    /// `(register, value)` pairs written in order during bring-up
    fn feed_config(&self) -> &[(u8, u8)];

    /// Decode one report and push the resulting events.
    ///
    /// Reports are not validated, a garbled report produces garbled events.
    fn decode(&mut self, report: &[u8; REPORT_LEN], events: &mut impl EventSink, log: &DebugLog);
}

/// Apply a separate sign bit to a delta magnitude.
///
/// Negative deltas are `magnitude - 255`, the same convention as the analog sensor.
fn signed_delta(magnitude: u8, negative: bool) -> i16 {
    if negative {
        magnitude as i16 - 0xff
    } else {
        magnitude as i16
    }
}

/// Relative mode decoder.
///
/// Emits motion with Y flipped to screen coordinates, and turns the primary button into a
/// single left click per press.
#[derive(Debug, Default)]
pub struct RelativeHandler {
    left_tapped: bool,
}

impl RelativeHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportHandler for RelativeHandler {
    fn feed_config(&self) -> &[(u8, u8)] {
        &RELATIVE_FEED_CONFIG
    }

    fn decode(&mut self, report: &[u8; REPORT_LEN], events: &mut impl EventSink, log: &DebugLog) {
        let buttons = report[0] & BUTTON_MASK;
        let x_delta = signed_delta(report[1], report[0] & X_SIGN != 0);
        let y_delta = signed_delta(report[2], report[0] & Y_SIGN != 0);
        let wheel_delta = report[3];

        if x_delta != 0 || y_delta != 0 {
            events.push(PointerEvent::Motion(MotionSample::new(x_delta, -y_delta)));
        }

        if buttons & BUTTON_PRIMARY != 0 {
            if !self.left_tapped {
                self.left_tapped = true;
                events.push(PointerEvent::Tap(MouseButton::Left));
            }
        } else {
            self.left_tapped = false;
        }

        if log.enabled() {
            debug!(
                "{}: buttons: {:#b}, x_delta: {}, y_delta: {}, w_delta: {}",
                log.name(),
                buttons,
                x_delta,
                y_delta,
                wheel_delta
            );
        }
    }
}

/// Position decoded from an absolute report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsoluteSample {
    pub buttons: u8,
    /// 12-bit X position
    pub x: u16,
    /// 12-bit Y position
    pub y: u16,
    /// Pressure level
    pub z: u8,
}

impl AbsoluteSample {
    pub fn from_report(report: &[u8; REPORT_LEN]) -> Self {
        let x_low = report[2] as u16;
        let y_low = report[3] as u16;
        let high = report[4] as u16;

        Self {
            buttons: report[0],
            x: ((high & 0x0f) << 8) | x_low,
            y: ((high & 0xf0) << 4) | y_low,
            z: report[5],
        }
    }
}

/// Absolute mode decoder.
///
/// Only decodes and logs positions, it does not emit events yet.
#[derive(Debug, Default)]
pub struct AbsoluteHandler {
    last_sample: Option<AbsoluteSample>,
}

impl AbsoluteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently decoded position
    pub fn last_sample(&self) -> Option<AbsoluteSample> {
        self.last_sample
    }
}

impl ReportHandler for AbsoluteHandler {
    fn feed_config(&self) -> &[(u8, u8)] {
        &ABSOLUTE_FEED_CONFIG
    }

    fn decode(&mut self, report: &[u8; REPORT_LEN], _events: &mut impl EventSink, log: &DebugLog) {
        let sample = AbsoluteSample::from_report(report);
        if log.enabled() {
            debug!(
                "{}: buttons: {:#b}, x_pos: {}, y_pos: {}, z_lvl: {}",
                log.name(),
                sample.buttons,
                sample.x,
                sample.y,
                sample.z
            );
        }
        self.last_sample = Some(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Events = heapless::Vec<PointerEvent, 8>;

    const LOG: DebugLog = DebugLog::new("glidepoint", true);

    fn relative_report(byte0: u8, x: u8, y: u8) -> [u8; REPORT_LEN] {
        [byte0, x, y, 0, 0, 0]
    }

    #[test]
    fn test_relative_feed_config() {
        assert_eq!(RelativeHandler::new().feed_config(), &[(0x05, 0x1d), (0x04, 0x00)]);
    }

    #[test]
    fn test_absolute_feed_config() {
        assert_eq!(AbsoluteHandler::new().feed_config(), &[(0x05, 0x00), (0x04, 0x47)]);
    }

    #[test]
    fn test_relative_motion_sign_and_y_flip() {
        let mut handler = RelativeHandler::new();
        let mut events = Events::new();

        handler.decode(&relative_report(0x00, 3, 4), &mut events, &LOG);
        // Both sign bits set: 0xfb - 255 = -4, 0xfe - 255 = -1
        handler.decode(&relative_report(X_SIGN | Y_SIGN, 0xfb, 0xfe), &mut events, &LOG);

        assert_eq!(
            events.as_slice(),
            &[
                PointerEvent::Motion(MotionSample::new(3, -4)),
                PointerEvent::Motion(MotionSample::new(-4, 1)),
            ]
        );
    }

    #[test]
    fn test_relative_no_motion_when_deltas_zero() {
        let mut handler = RelativeHandler::new();
        let mut events = Events::new();

        handler.decode(&relative_report(0x00, 0, 0), &mut events, &LOG);
        // Only one axis moved, the other is still reported as zero
        handler.decode(&relative_report(0x00, 0, 2), &mut events, &LOG);

        assert_eq!(events.as_slice(), &[PointerEvent::Motion(MotionSample::new(0, -2))]);
    }

    #[test]
    fn test_relative_tap_is_edge_triggered() {
        let mut handler = RelativeHandler::new();
        let mut events = Events::new();

        handler.decode(&relative_report(0x01, 0, 0), &mut events, &LOG);
        assert_eq!(events.as_slice(), &[PointerEvent::Tap(MouseButton::Left)]);

        // Held: no repeat
        handler.decode(&relative_report(0x01, 0, 0), &mut events, &LOG);
        handler.decode(&relative_report(0x01, 0, 0), &mut events, &LOG);
        assert_eq!(events.len(), 1);

        // Released, then pressed again
        handler.decode(&relative_report(0x00, 0, 0), &mut events, &LOG);
        assert_eq!(events.len(), 1);
        handler.decode(&relative_report(0x01, 0, 0), &mut events, &LOG);
        assert_eq!(
            events.as_slice(),
            &[PointerEvent::Tap(MouseButton::Left), PointerEvent::Tap(MouseButton::Left)]
        );
    }

    #[test]
    fn test_relative_other_buttons_do_not_tap() {
        let mut handler = RelativeHandler::new();
        let mut events = Events::new();

        handler.decode(&relative_report(0x06, 0, 0), &mut events, &LOG);
        assert!(events.is_empty());
    }

    #[test]
    fn test_relative_tap_with_motion() {
        let mut handler = RelativeHandler::new();
        let mut events = Events::new();

        handler.decode(&relative_report(0x01 | X_SIGN, 0xfe, 0), &mut events, &LOG);
        assert_eq!(
            events.as_slice(),
            &[
                PointerEvent::Motion(MotionSample::new(-1, 0)),
                PointerEvent::Tap(MouseButton::Left),
            ]
        );
    }

    #[test]
    fn test_absolute_decodes_without_events() {
        let mut handler = AbsoluteHandler::new();
        let mut events = Events::new();
        assert_eq!(handler.last_sample(), None);

        handler.decode(&[0x01, 0x00, 0x34, 0x78, 0x5a, 0x20], &mut events, &LOG);

        assert!(events.is_empty());
        assert_eq!(
            handler.last_sample(),
            Some(AbsoluteSample {
                buttons: 0x01,
                x: 0x0a34,
                y: 0x0578,
                z: 0x20,
            })
        );
    }
}
