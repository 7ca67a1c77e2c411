//! Document composition.
//!
//! [`compose`] is a pure function from a project snapshot and the current
//! instrumentation to one self-contained HTML document. Recomposition is
//! always total: nothing is cached or diffed between calls.

mod aggregate;
pub mod markdown;
mod single;

use crate::instrument::Instrumentation;
use crate::store::{ENTRY_HTML, FileKind, ProjectSnapshot};
use std::fmt;

/// How a document was composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The whole project around the entry HTML.
    Aggregate,
    /// One non-entry file rendered on its own.
    Single(FileKind),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => f.write_str("aggregate"),
            Self::Single(kind) => write!(f, "{kind}"),
        }
    }
}

/// Output of one composition. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    pub html: String,
    pub mode: Mode,
    /// The selected file this document was composed for.
    pub file: String,
    /// Raw content of the selected file in single-file mode.
    pub source: Option<String>,
}

/// Compose the snapshot into one document.
///
/// Aggregate mode applies when the entry HTML is selected or the selection
/// is not part of the snapshot.
pub fn compose(snapshot: &ProjectSnapshot, instrumentation: &Instrumentation) -> ComposedDocument {
    match snapshot.selected_file() {
        Some(file) if file.name != ENTRY_HTML => ComposedDocument {
            html: single::render(file, instrumentation),
            mode: Mode::Single(file.kind),
            file: file.name.clone(),
            source: Some(file.content.clone()),
        },
        _ => ComposedDocument {
            html: aggregate::render(snapshot, instrumentation),
            mode: Mode::Aggregate,
            file: snapshot.selected.clone(),
            source: None,
        },
    }
}

#[cfg(test)]
mod tests;
