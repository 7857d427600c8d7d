/// Per-component switch for verbose diagnostics.
///
/// Every module receives one at construction. Hot paths (report decoding, raw sensor
/// readings) only log when it is enabled; the output goes through the crate's
/// `defmt`/`log` macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugLog {
    name: &'static str,
    enabled: bool,
}

impl DebugLog {
    pub const fn new(name: &'static str, enabled: bool) -> Self {
        Self { name, enabled }
    }

    pub const fn disabled(name: &'static str) -> Self {
        Self::new(name, false)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
