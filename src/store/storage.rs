//! Durable key-value storage.
//!
//! Mirrors the browser's `localStorage`: string keys mapped to string values,
//! where most values are themselves JSON documents. `JsonFileStorage` keeps the
//! whole map in one JSON object on disk and rewrites it on every change.

use super::error::StorageError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// String key-value storage shared by the store, preferences and mock backend.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStorage = Arc<Mutex<dyn Storage>>;

/// `--storage` value selecting [`MemoryStorage`].
pub const IN_MEMORY: &str = ":memory:";

/// Open the storage named by a configured path.
pub fn open_shared(path: &Path) -> SharedStorage {
    if path.as_os_str() == IN_MEMORY {
        MemoryStorage::shared()
    } else {
        JsonFileStorage::shared(path)
    }
}

/// Volatile storage, used by tests and `--storage :memory:`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn shared() -> SharedStorage {
        Arc::new(Mutex::new(Self::default()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as one JSON object in a file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open the storage file, starting empty when it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                crate::log!("storage"; "ignoring unreadable storage: {e}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn shared(path: impl Into<PathBuf>) -> SharedStorage {
        Arc::new(Mutex::new(Self::open(path)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StorageError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(self.path.clone(), e))
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let raw = fs::read_to_string(path).map_err(|e| StorageError::Io(path.to_path_buf(), e))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.get("files"), None);
        storage.set("files", "{}".into()).unwrap();
        assert_eq!(storage.get("files").as_deref(), Some("{}"));
        storage.remove("files").unwrap();
        assert_eq!(storage.get("files"), None);
    }

    #[test]
    fn test_open_shared_in_memory_writes_nothing() {
        let storage = open_shared(Path::new(IN_MEMORY));
        storage.lock().set("currentFile", "index.html".into()).unwrap();
        assert_eq!(storage.lock().get("currentFile").as_deref(), Some("index.html"));
        assert!(!Path::new(IN_MEMORY).exists());
    }

    #[test]
    fn test_json_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/storage.json");

        let mut storage = JsonFileStorage::open(&path);
        storage.set("currentFile", "note.md".into()).unwrap();
        assert!(path.exists());

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get("currentFile").as_deref(), Some("note.md"));
    }

    #[test]
    fn test_json_file_storage_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("files"), None);
    }
}
