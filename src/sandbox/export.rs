//! Exports built from the last composed document or the raw project files.

use crate::compose::{ComposedDocument, Mode};
use crate::store::File;
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Characters kept literal in a `data:` URL, as `encodeURIComponent` does.
const DATA_URL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What "copy" puts on the clipboard: a `data:text/html` URL of the whole
/// document in aggregate mode, the selected file's raw text otherwise.
pub fn copy_payload(doc: &ComposedDocument) -> String {
    match (&doc.mode, &doc.source) {
        (Mode::Single(_), Some(source)) => source.clone(),
        _ => format!(
            "data:text/html;charset=utf-8,{}",
            utf8_percent_encode(&doc.html, DATA_URL)
        ),
    }
}

/// Write the composed document as a standalone HTML file.
pub fn write_artifact(doc: &ComposedDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, &doc.html).with_context(|| format!("failed to write {}", path.display()))
}

/// Write every project file verbatim under its store name.
pub fn write_downloads(files: &[File], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    files
        .iter()
        .map(|file| {
            let name = Path::new(&file.name);
            if name.components().count() != 1
                || !matches!(name.components().next(), Some(Component::Normal(_)))
            {
                anyhow::bail!("refusing to export `{}` outside {}", file.name, dir.display());
            }
            let path = dir.join(name);
            fs::write(&path, &file.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileKind, FileStore};
    use tempfile::TempDir;

    fn doc(mode: Mode, html: &str, source: Option<&str>) -> ComposedDocument {
        ComposedDocument {
            html: html.into(),
            mode,
            file: "x".into(),
            source: source.map(Into::into),
        }
    }

    #[test]
    fn test_copy_payload_aggregate_is_data_url() {
        let payload = copy_payload(&doc(Mode::Aggregate, "<p>a b</p>#", None));
        assert_eq!(payload, "data:text/html;charset=utf-8,%3Cp%3Ea%20b%3C%2Fp%3E%23");
    }

    #[test]
    fn test_copy_payload_single_is_raw_source() {
        let payload = copy_payload(&doc(
            Mode::Single(FileKind::Markdown),
            "<h1>T</h1>",
            Some("# T"),
        ));
        assert_eq!(payload, "# T");
    }

    #[test]
    fn test_write_downloads_keeps_literal_content() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_memory();
        let written = write_downloads(store.files(), dir.path()).unwrap();

        assert_eq!(written.len(), 3);
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains(r#"<link rel="stylesheet" href="styles.css">"#));
        assert!(index.contains(r#"<script src="script.js"></script>"#));
    }

    #[test]
    fn test_write_downloads_refuses_paths() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let escaped = outside.path().join("escaped.txt");
        let files = [File::new(escaped.to_string_lossy(), "x", FileKind::Other)];

        assert!(write_downloads(&files, dir.path()).is_err());
        assert!(!escaped.exists());

        let files = [File::new("../up.js", "x", FileKind::Js)];
        assert!(write_downloads(&files, dir.path()).is_err());
    }

    #[test]
    fn test_write_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/preview.html");
        write_artifact(&doc(Mode::Aggregate, "<html></html>", None), &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
