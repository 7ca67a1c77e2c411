//! Instrumentation spliced into every executable preview document.
//!
//! The console part always runs. The network part replaces `window.fetch`
//! and is only added while the mock backend has something to serve.

use crate::embed::shim::{CONSOLE_JS, NETWORK_JS};
use crate::mock::MockBackend;

/// Script fragment (no surrounding tag) run before any project script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrumentation {
    script: String,
    network: bool,
}

pub struct Injector;

impl Injector {
    /// Console capture, plus the fetch override when `mock_active`.
    pub fn shim(mock_active: bool) -> Instrumentation {
        let script = if mock_active {
            format!("{}\n{}", CONSOLE_JS.trim_end(), NETWORK_JS.trim_end())
        } else {
            CONSOLE_JS.trim_end().to_string()
        };
        Instrumentation {
            script,
            network: mock_active,
        }
    }

    pub fn for_backend(backend: &MockBackend) -> Instrumentation {
        Self::shim(backend.is_active())
    }
}

impl Instrumentation {
    pub fn as_str(&self) -> &str {
        &self.script
    }

    /// Whether the fetch override is included.
    pub const fn has_network(&self) -> bool {
        self.network
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Injector::shim(false)
    }
}
