//! `playpen compose` and `playpen export`: one-shot artifacts.

use crate::compose::{ComposedDocument, compose};
use crate::instrument::Injector;
use crate::log;
use crate::mock::MockBackend;
use crate::sandbox::export;
use crate::store::{FileStore, SharedStorage, StoreError};
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Compose the project as the live preview would, without changing the
/// persisted selection.
pub fn compose_document(file: Option<&str>, storage: &SharedStorage) -> Result<ComposedDocument> {
    let store = FileStore::load(Arc::clone(storage));
    let backend = MockBackend::load(storage);

    let mut snapshot = store.snapshot();
    if let Some(name) = file {
        if snapshot.get(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()).into());
        }
        snapshot.selected = name.to_string();
    }

    Ok(compose(&snapshot, &Injector::for_backend(&backend)))
}

pub fn run_compose(
    file: Option<&str>,
    output: Option<&Path>,
    storage: &SharedStorage,
    out: &mut dyn Write,
) -> Result<()> {
    let doc = compose_document(file, storage)?;
    match output {
        Some(path) => {
            export::write_artifact(&doc, path)?;
            log!("compose"; "{} ({}) -> {}", doc.file, doc.mode, path.display());
        }
        None => out.write_all(doc.html.as_bytes())?,
    }
    Ok(())
}

/// Write every project file under `dir`.
pub fn run_export(dir: &Path, storage: &SharedStorage) -> Result<Vec<PathBuf>> {
    let store = FileStore::load(Arc::clone(storage));
    let written = export::write_downloads(store.files(), dir)?;
    log!("export"; "{} files -> {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Mode;
    use crate::store::{ENTRY_HTML, FileKind, MemoryStorage};
    use std::fs;

    #[test]
    fn test_compose_defaults_to_aggregate() {
        let storage = MemoryStorage::shared();
        let mut out = Vec::new();
        run_compose(None, None, &storage, &mut out).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("<style>"));
        assert!(!html.contains("href=\"styles.css\""));
    }

    #[test]
    fn test_compose_named_file_keeps_selection() {
        let storage = MemoryStorage::shared();
        {
            let mut store = FileStore::load(Arc::clone(&storage));
            store.add("data.json", FileKind::Json).unwrap();
        }

        let doc = compose_document(Some("data.json"), &storage).unwrap();
        assert_eq!(doc.mode, Mode::Single(FileKind::Json));
        assert_eq!(FileStore::load(storage).selected(), ENTRY_HTML);
    }

    #[test]
    fn test_compose_missing_file() {
        let storage = MemoryStorage::shared();
        let err = compose_document(Some("nope.js"), &storage).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::NotFound("nope.js".into()))
        );
    }

    #[test]
    fn test_compose_to_file() {
        let storage = MemoryStorage::shared();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/preview.html");
        run_compose(None, Some(&path), &storage, &mut Vec::new()).unwrap();
        assert!(fs::read_to_string(path).unwrap().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_export_writes_literal_files() {
        let storage = MemoryStorage::shared();
        let dir = tempfile::tempdir().unwrap();
        let written = run_export(dir.path(), &storage).unwrap();
        assert_eq!(written.len(), 3);

        let index = fs::read_to_string(dir.path().join(ENTRY_HTML)).unwrap();
        assert!(index.contains("<link rel=\"stylesheet\" href=\"styles.css\">"));
    }
}
