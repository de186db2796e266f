//! Browser local storage implementation for WebAssembly.

use super::{BlobStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

fn js_error(context: &str, e: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{}: {:?}", context, e))
}

/// Blob store backed by `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage error", e))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl BlobStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("Get error", e))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here.
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("Set error", e))
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("Remove error", e))
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(|e| js_error("Length error", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(|e| js_error("Key error", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
