//! Host-side console: the append-only sequence of events reported by the sandbox.

use crate::protocol::ConsoleLevel;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEvent {
    pub level: ConsoleLevel,
    pub text: String,
    /// Milliseconds since the Unix epoch, taken on arrival.
    pub timestamp: u64,
}

impl ConsoleEvent {
    pub fn now(level: ConsoleLevel, text: impl Into<String>) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            level,
            text: text.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleLog {
    events: Vec<ConsoleEvent>,
}

impl ConsoleLog {
    pub fn push(&mut self, event: ConsoleEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[ConsoleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count of events at `level`.
    pub fn count(&self, level: ConsoleLevel) -> usize {
        self.events.iter().filter(|e| e.level == level).count()
    }
}
