//! Read-only view of host state for the HTTP server.
//!
//! The host actor publishes immutable snapshots after every change; request
//! handlers on the rayon pool only ever load them.

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::compose::ComposedDocument;
use crate::store::ProjectSnapshot;

#[derive(Default)]
pub struct Published {
    snapshot: ArcSwap<ProjectSnapshot>,
    document: ArcSwapOption<ComposedDocument>,
}

impl Published {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_snapshot(&self, snapshot: ProjectSnapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    pub fn set_document(&self, doc: ComposedDocument) {
        self.document.store(Some(Arc::new(doc)));
    }

    /// Latest project files
    pub fn snapshot(&self) -> Arc<ProjectSnapshot> {
        self.snapshot.load_full()
    }

    /// Last composed document, if any
    pub fn document(&self) -> Option<Arc<ComposedDocument>> {
        self.document.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::instrument::Injector;
    use crate::store::FileStore;

    #[test]
    fn test_publish_replaces_previous() {
        let published = Published::new();
        assert!(published.document().is_none());
        assert!(published.snapshot().files.is_empty());

        let store = FileStore::in_memory();
        let snapshot = store.snapshot();
        let doc = compose(&snapshot, &Injector::shim(false));
        published.set_snapshot(snapshot);
        published.set_document(doc.clone());

        assert_eq!(published.snapshot().files.len(), 3);
        assert_eq!(published.document().unwrap().html, doc.html);
    }
}
