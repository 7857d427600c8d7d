//! Lifecycle contract between the keyboard scan loop and a pointing device module.

use embassy_time::Instant;

use crate::event::EventSink;

/// A module driven by the host scan loop.
///
/// The host calls [`ScanModule::on_bootup`] once, then on every tick:
///
/// ```text
/// on_pre_scan -> [matrix scan] -> on_post_scan -> [HID assembly] -> on_before_hid_send -> on_after_hid_send
/// ```
///
/// [`ScanModule::on_powersave_enable`] and [`ScanModule::on_powersave_disable`] are called
/// out of band when the host enters or leaves its idle state. Every hook defaults to a no-op.
///
/// Errors are never handled by the module itself; the host decides whether to halt or
/// disable the module.
pub trait ScanModule {
    type Error;

    async fn on_bootup(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the matrix scan with the current monotonic time.
    async fn on_pre_scan(&mut self, _now: Instant, _events: &mut impl EventSink) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the matrix scan.
    async fn on_post_scan(&mut self, _events: &mut impl EventSink) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_before_hid_send(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_after_hid_send(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_powersave_enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_powersave_disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Run one scan tick of `module`, calling its per-tick hooks in order.
///
/// The host-side steps between the hooks (matrix scan, HID assembly) are not part of this crate.
pub async fn scan_tick<M: ScanModule>(module: &mut M, now: Instant, events: &mut impl EventSink) -> Result<(), M::Error> {
    module.on_pre_scan(now, events).await?;
    module.on_post_scan(events).await?;
    module.on_before_hid_send().await?;
    module.on_after_hid_send().await
}
