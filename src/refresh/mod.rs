//! Refresh scheduling: when to recompose the preview.
//!
//! ```text
//!            request                 poll (deadline passed)
//!   Idle ─────────────▶ Pending ──────────────────────────▶ Rendering
//!    ▲                   ▲   │ ▲                                │  │
//!    │                   │   └─┘ request (deadline replaced)    │  │
//!    │                   └──────── request / render_failed ─────┘  │
//!    └──────────────────────────── render_complete ─────────────────┘
//! ```
//!
//! Edits are debounced on the trailing edge: every edit while pending pushes
//! the deadline out again. All other triggers are immediate. Time is passed
//! in explicitly so the machine stays deterministic.

use std::time::{Duration, Instant};

/// Why a recomposition was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// File content changed.
    Edit,
    /// Selection changed.
    Switch,
    /// A file was added, deleted or renamed.
    Structure,
    /// Explicit refresh.
    Manual,
    /// A surface became available.
    Mount,
}

impl Trigger {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Switch => "switch",
            Self::Structure => "structure",
            Self::Manual => "manual",
            Self::Mount => "mount",
        }
    }

    /// Manual refresh and mount run even with auto-update off.
    const fn is_forced(self) -> bool {
        matches!(self, Self::Manual | Self::Mount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    /// Waiting for `deadline`; `None` means parked until the next trigger.
    Pending { deadline: Option<Instant> },
    Rendering,
}

/// Result of [`RefreshScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Compose,
    Wait,
}

#[derive(Debug)]
pub struct RefreshScheduler {
    state: RefreshState,
    debounce: Duration,
    auto_update: bool,
}

impl RefreshScheduler {
    pub fn new(debounce: Duration, auto_update: bool) -> Self {
        Self {
            state: RefreshState::Idle,
            debounce,
            auto_update,
        }
    }

    /// Register a trigger. Returns `false` when it was ignored because
    /// auto-update is off.
    pub fn request(&mut self, trigger: Trigger, now: Instant) -> bool {
        if !self.auto_update && !trigger.is_forced() {
            crate::debug!("refresh"; "{} ignored, auto-update off", trigger.label());
            return false;
        }
        let deadline = match trigger {
            Trigger::Edit => now + self.debounce,
            _ => now,
        };
        self.state = RefreshState::Pending {
            deadline: Some(deadline),
        };
        true
    }

    /// Move to `Rendering` once the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Poll {
        match self.state {
            RefreshState::Pending {
                deadline: Some(deadline),
            } if deadline <= now => {
                self.state = RefreshState::Rendering;
                Poll::Compose
            }
            _ => Poll::Wait,
        }
    }

    /// The surface was not mounted: park until the next trigger.
    pub fn render_failed(&mut self) {
        self.state = RefreshState::Pending { deadline: None };
    }

    /// The cycle finished. A request that arrived meanwhile stays pending.
    pub fn render_complete(&mut self) {
        if self.state == RefreshState::Rendering {
            self.state = RefreshState::Idle;
        }
    }

    /// Time until the pending deadline, if any.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match self.state {
            RefreshState::Pending {
                deadline: Some(deadline),
            } => Some(deadline.saturating_duration_since(now)),
            _ => None,
        }
    }

    pub fn set_auto_update(&mut self, on: bool) {
        self.auto_update = on;
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }
}

#[cfg(test)]
mod tests;
