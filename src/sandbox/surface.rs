//! The execution surface: wherever the composed document actually runs.

use super::Viewport;
use crate::protocol::ShellMsg;

/// Something that can host the preview document.
///
/// Production: every connected browser shell. Tests: [`RecordingSurface`].
pub trait Surface: Send {
    /// Whether at least one iframe is available to load into.
    fn is_mounted(&self) -> bool;

    /// Fully replace the iframe document.
    fn load(&self, html: &str, viewport: Viewport);

    /// Send a control message to the shell.
    fn post(&self, message: &ShellMsg);
}

#[cfg(test)]
pub use recording::RecordingSurface;
