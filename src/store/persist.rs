//! Storage keys and typed JSON access on top of [`Storage`](super::Storage).

use super::error::StorageError;
use super::storage::SharedStorage;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const FILES: &str = "files";
pub const CURRENT_FILE: &str = "currentFile";
pub const SETTINGS: &str = "settings";
pub const LAYOUT_VIEW: &str = "layout.view";
pub const LAYOUT_PANEL_WIDTH: &str = "layout.panelWidthPercent";
pub const LAYOUT_DOCKED: &str = "layout.dockedFiles";
pub const MOCK_ENDPOINTS: &str = "mock.endpoints";
pub const MOCK_COLLECTIONS: &str = "mock.collections";

/// Read and decode a JSON value. Absent keys and parse failures yield `None`;
/// parse failures are logged.
pub fn load_json<T: DeserializeOwned>(storage: &SharedStorage, key: &str) -> Option<T> {
    let raw = storage.lock().get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            crate::log!("storage"; "ignoring unparseable `{key}`: {e}");
            None
        }
    }
}

/// Encode and write a JSON value. Failures are logged and never propagated.
pub fn save_json<T: Serialize + ?Sized>(storage: &SharedStorage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| storage.lock().set(key, json));
    if let Err(e) = result {
        crate::log!("storage"; "failed to persist `{key}`: {e}");
    }
}

/// Read a plain string value.
pub fn load_str(storage: &SharedStorage, key: &str) -> Option<String> {
    storage.lock().get(key)
}

/// Write a plain string value. Failures are logged and never propagated.
pub fn save_str(storage: &SharedStorage, key: &str, value: &str) {
    if let Err(e) = storage.lock().set(key, value.to_string()) {
        crate::log!("storage"; "failed to persist `{key}`: {e}");
    }
}
