//! Events emitted by pointing device modules and the sink they are pushed into.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

/// Relative pointer displacement since the last sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    pub dx: i16,
    pub dy: i16,
}

impl MotionSample {
    pub const fn new(dx: i16, dy: i16) -> Self {
        Self { dx, dy }
    }
}

/// Mouse buttons a module can tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Event produced by a pointing device module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerEvent {
    /// Relative motion, fed to the host's pointer axis accumulator
    Motion(MotionSample),
    /// A single press + release of a mouse button, fed to the host's key event queue
    Tap(MouseButton),
}

/// Destination of the events produced by the modules.
///
/// The host implements this for whatever feeds its HID pipeline. Modules never block on
/// the sink: if it is full, the event is dropped.
pub trait EventSink {
    fn push(&mut self, event: PointerEvent);
}

impl<const N: usize> EventSink for heapless::Vec<PointerEvent, N> {
    fn push(&mut self, event: PointerEvent) {
        if heapless::Vec::push(self, event).is_err() {
            warn!("Event buffer full, dropping {:?}", event);
        }
    }
}

impl<M: RawMutex, const N: usize> EventSink for Sender<'_, M, PointerEvent, N> {
    fn push(&mut self, event: PointerEvent) {
        if self.try_send(event).is_err() {
            warn!("Event channel full, dropping {:?}", event);
        }
    }
}
