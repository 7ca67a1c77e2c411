//! In-memory project files with durable persistence.
//!
//! The [`FileStore`] is the single owner of the project. Every successful
//! mutation writes the whole file map and the active selection back to
//! storage; composition only ever sees immutable [`ProjectSnapshot`]s.

mod error;
mod file;
pub mod persist;
pub mod prefs;
mod storage;

pub use error::{StorageError, StoreError};
pub use file::{ENTRY_CSS, ENTRY_HTML, ENTRY_JS, File, FileKind, PROTECTED, defaults};
pub use storage::{IN_MEMORY, JsonFileStorage, MemoryStorage, SharedStorage, Storage, open_shared};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted form of one file, keyed by name in the `files` map.
#[derive(Debug, Serialize, Deserialize)]
struct StoredFile {
    content: String,
    kind: FileKind,
}

/// `(name, kind)` pair of the file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub kind: FileKind,
}

/// Immutable copy of the whole project plus the selected file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSnapshot {
    pub files: Vec<File>,
    pub selected: String,
}

impl ProjectSnapshot {
    pub fn get(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name == name)
    }

    /// The selected file, if it is part of the snapshot.
    pub fn selected_file(&self) -> Option<&File> {
        self.get(&self.selected)
    }

    /// Files of `kind`, `entry` first when present, then the rest in listing order.
    pub fn entry_first(&self, kind: FileKind, entry: &str) -> impl Iterator<Item = &File> {
        let head = self.get(entry).filter(|f| f.kind == kind);
        let tail = self
            .files
            .iter()
            .filter(move |f| f.kind == kind && f.name != entry);
        head.into_iter().chain(tail)
    }
}

pub struct FileStore {
    files: Vec<File>,
    selected: String,
    storage: SharedStorage,
}

impl FileStore {
    /// Hydrate from storage, keeping the built-in defaults for anything
    /// missing or unparseable.
    pub fn load(storage: SharedStorage) -> Self {
        let mut files = persist::load_json::<Map<String, Value>>(&storage, persist::FILES)
            .map(hydrate_files)
            .unwrap_or_else(defaults);

        for (index, default) in defaults().into_iter().enumerate() {
            if !files.iter().any(|f| f.name == default.name) {
                crate::debug!("store"; "restoring protected file {}", default.name);
                files.insert(index.min(files.len()), default);
            }
        }

        let selected = persist::load_str(&storage, persist::CURRENT_FILE)
            .filter(|name| files.iter().any(|f| &f.name == name))
            .unwrap_or_else(|| ENTRY_HTML.to_string());

        Self {
            files,
            selected,
            storage,
        }
    }

    /// A store with the default project and volatile storage.
    pub fn in_memory() -> Self {
        Self::load(MemoryStorage::shared())
    }

    /// The single protected-name predicate consulted by every mutation.
    pub fn is_protected(name: &str) -> bool {
        PROTECTED.contains(&name)
    }

    /// Insert a new file with the seed content of its kind.
    pub fn add(&mut self, name: &str, kind: FileKind) -> Result<(), StoreError> {
        validate_name(name)?;
        if self.position(name).is_some() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        self.files.push(File::new(name, kind.seed(name), kind));
        self.persist();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Replace a file's content. The kind never changes.
    pub fn update(&mut self, name: &str, content: impl Into<String>) -> Result<(), StoreError> {
        let index = self.require(name)?;
        self.files[index].content = content.into();
        self.persist();
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        if Self::is_protected(name) {
            return Err(StoreError::ProtectedFile(name.to_string()));
        }
        let index = self.require(name)?;
        self.files.remove(index);
        if self.selected == name {
            self.selected = ENTRY_HTML.to_string();
        }
        self.persist();
        Ok(())
    }

    /// Rename in place: content, kind and listing position are kept and the
    /// selection follows the file.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if Self::is_protected(old) {
            return Err(StoreError::ProtectedFile(old.to_string()));
        }
        validate_name(new)?;
        let index = self.require(old)?;
        if self.position(new).is_some() {
            return Err(StoreError::AlreadyExists(new.to_string()));
        }
        self.files[index].name = new.to_string();
        if self.selected == old {
            self.selected = new.to_string();
        }
        self.persist();
        Ok(())
    }

    pub fn select(&mut self, name: &str) -> Result<(), StoreError> {
        self.require(name)?;
        if self.selected != name {
            self.selected = name.to_string();
            self.persist();
        }
        Ok(())
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn list(&self) -> Vec<FileEntry> {
        self.files
            .iter()
            .map(|f| FileEntry {
                name: f.name.clone(),
                kind: f.kind,
            })
            .collect()
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            files: self.files.clone(),
            selected: self.selected.clone(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.name == name)
    }

    fn require(&self, name: &str) -> Result<usize, StoreError> {
        self.position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Write the whole map and the selection. In-memory state stays
    /// authoritative when this fails.
    fn persist(&self) {
        let map: Map<String, Value> = self
            .files
            .iter()
            .filter_map(|f| {
                let stored = StoredFile {
                    content: f.content.clone(),
                    kind: f.kind,
                };
                serde_json::to_value(stored).ok().map(|v| (f.name.clone(), v))
            })
            .collect();
        persist::save_json(&self.storage, persist::FILES, &map);
        persist::save_str(&self.storage, persist::CURRENT_FILE, &self.selected);
    }
}

fn hydrate_files(map: Map<String, Value>) -> Vec<File> {
    map.into_iter()
        .filter(|(name, _)| match validate_name(name) {
            Ok(()) => true,
            Err(e) => {
                crate::log!("storage"; "skipping persisted file: {e}");
                false
            }
        })
        .filter_map(|(name, value)| match serde_json::from_value::<StoredFile>(value) {
            Ok(stored) => Some(File::new(name, stored.content, stored.kind)),
            Err(e) => {
                crate::log!("storage"; "skipping persisted file `{name}`: {e}");
                None
            }
        })
        .collect()
}

/// Reject names that are empty, whitespace-only, or would escape an export directory.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name != name.trim()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
