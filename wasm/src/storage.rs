//! `window.localStorage` as a key/value store

use shared::storage::KeyValueStore;
use shared::StorageError;
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn backend_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", err))
}

/// Key/value access to the browser's local storage
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn from_window() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Backend("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(backend_error)?
            .ok_or_else(|| StorageError::Backend("localStorage is unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here
        self.storage.set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(backend_error)
    }
}
