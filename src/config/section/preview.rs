//! `[preview]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! debounce_ms = 500       # Quiet period after the last edit before recomposing
//! settle_ms = 300         # How long the loading indicator stays up
//! viewport = "desktop"    # mobile | tablet | desktop
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::actor::HostOptions;
use crate::sandbox::Viewport;

/// Upper bound for both delays; anything longer reads as a hang.
pub const MAX_DELAY_MS: u64 = 10_000;

/// Live preview timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub debounce_ms: u64,
    pub settle_ms: u64,
    pub viewport: Viewport,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            settle_ms: 300,
            viewport: Viewport::Desktop,
        }
    }
}

impl PreviewConfig {
    pub fn host_options(&self) -> HostOptions {
        HostOptions {
            debounce: Duration::from_millis(self.debounce_ms),
            settle: Duration::from_millis(self.settle_ms),
            viewport: self.viewport,
        }
    }

    /// Range-check the delays, returning the offending field name.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [("debounce_ms", self.debounce_ms), ("settle_ms", self.settle_ms)] {
            if value > MAX_DELAY_MS {
                return Err(format!(
                    "{field} = {value} exceeds the maximum of {MAX_DELAY_MS}"
                ));
            }
        }
        Ok(())
    }
}
