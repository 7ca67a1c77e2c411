//! Sandbox renderer: owns the execution surface and the host console.
//!
//! Each [`reload`](SandboxRenderer::reload) starts a cycle: the console is
//! cleared, the loading indicator shown, the document fully replaced, and a
//! settle timer armed. [`settle`](SandboxRenderer::settle) hides the indicator
//! once that timer has passed.

mod console;
pub mod export;
mod surface;
mod viewport;

pub use console::{ConsoleEvent, ConsoleLog};
#[cfg(test)]
pub use surface::RecordingSurface;
pub use surface::Surface;
pub use viewport::Viewport;

use crate::compose::ComposedDocument;
use crate::mock::MockResponse;
use crate::protocol::{ConsoleLevel, FetchOptions, HostToSandbox, SandboxMessage, ShellMsg};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("sandbox surface is not mounted")]
    NotReady,
}

/// A `fetch` the sandbox is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub options: FetchOptions,
}

pub struct SandboxRenderer<S: Surface> {
    surface: S,
    console: ConsoleLog,
    viewport: Viewport,
    current: Option<ComposedDocument>,
    settle: Duration,
    settle_at: Option<Instant>,
}

impl<S: Surface> SandboxRenderer<S> {
    pub fn new(surface: S, viewport: Viewport, settle: Duration) -> Self {
        Self {
            surface,
            console: ConsoleLog::default(),
            viewport,
            current: None,
            settle,
            settle_at: None,
        }
    }

    /// Start a composition cycle with `doc`.
    ///
    /// `doc` becomes the export source even when nothing is mounted to show it.
    pub fn reload(&mut self, doc: ComposedDocument, now: Instant) -> Result<(), RenderError> {
        self.clear_console();
        let doc = self.current.insert(doc);
        if !self.surface.is_mounted() {
            return Err(RenderError::NotReady);
        }
        self.surface.post(&ShellMsg::Loading { active: true });
        self.surface.load(&doc.html, self.viewport);
        self.settle_at = Some(now + self.settle);
        Ok(())
    }

    /// Hide the loading indicator once the settle delay has passed.
    ///
    /// Returns `true` when this call completed the cycle.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.settle_at {
            Some(at) if at <= now => {
                self.settle_at = None;
                self.surface.post(&ShellMsg::Loading { active: false });
                true
            }
            _ => false,
        }
    }

    /// Time until the pending settle, if a cycle is in progress.
    pub fn next_settle(&self, now: Instant) -> Option<Duration> {
        self.settle_at.map(|at| at.saturating_duration_since(now))
    }

    pub fn is_loading(&self) -> bool {
        self.settle_at.is_some()
    }

    /// Handle a message posted by the sandbox. A `mock-fetch` is returned for
    /// the caller to resolve.
    pub fn on_message(&mut self, message: SandboxMessage) -> Option<FetchRequest> {
        match message {
            SandboxMessage::ConsoleLog { level, content } => {
                match level {
                    ConsoleLevel::Error => crate::logger::status_error("console error", &content),
                    ConsoleLevel::Warn => crate::logger::status_warning(&content),
                    ConsoleLevel::Log => crate::debug!("console"; "{content}"),
                }
                let event = ConsoleEvent::now(level, content);
                self.surface.post(&ShellMsg::Console {
                    event: event.clone(),
                });
                self.console.push(event);
                None
            }
            SandboxMessage::MockFetch { url, options } => Some(FetchRequest { url, options }),
        }
    }

    /// Deliver a resolved mock response into the sandbox.
    pub fn respond(&self, url: String, response: MockResponse) {
        self.surface.post(&ShellMsg::Sandbox {
            message: HostToSandbox::MockFetchResponse { url, response },
        });
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
        self.surface.post(&ShellMsg::ConsoleCleared);
    }

    /// Change the width hint without recomposing.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.post(&ShellMsg::viewport(viewport));
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The last composed document as a standalone HTML page.
    pub fn open_artifact(&self) -> Option<&str> {
        self.current.as_ref().map(|doc| doc.html.as_str())
    }

    pub fn copy_payload(&self) -> Option<String> {
        self.current.as_ref().map(export::copy_payload)
    }

    pub fn current(&self) -> Option<&ComposedDocument> {
        self.current.as_ref()
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
