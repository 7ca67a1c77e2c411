//! `[storage]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! path = "~/.playpen/scratch.json"   # Relative paths resolve against the config dir
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Durable project storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".playpen/storage.json"),
        }
    }
}

impl StorageConfig {
    /// Expand `~` and anchor relative paths at `root`.
    pub fn normalize(&mut self, root: &Path) {
        if self.path.as_os_str() == crate::store::IN_MEMORY {
            return;
        }
        let expanded = shellexpand::tilde(&self.path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        self.path = if path.is_relative() {
            root.join(path)
        } else {
            path
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_storage_default() {
        let config = test_parse_config("");
        assert_eq!(config.storage.path, PathBuf::from(".playpen/storage.json"));
    }

    #[test]
    fn test_storage_relative_to_root() {
        let mut storage = StorageConfig::default();
        storage.normalize(Path::new("/work/demo"));
        assert_eq!(storage.path, PathBuf::from("/work/demo/.playpen/storage.json"));
    }

    #[test]
    fn test_storage_absolute_kept() {
        let mut storage = StorageConfig {
            path: PathBuf::from("/var/lib/playpen.json"),
        };
        storage.normalize(Path::new("/work"));
        assert_eq!(storage.path, PathBuf::from("/var/lib/playpen.json"));
    }

    #[test]
    fn test_in_memory_left_alone() {
        let mut storage = StorageConfig {
            path: PathBuf::from(":memory:"),
        };
        storage.normalize(Path::new("/work"));
        assert_eq!(storage.path, PathBuf::from(":memory:"));
    }
}
