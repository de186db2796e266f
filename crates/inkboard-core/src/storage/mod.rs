//! Key-value blob storage backends.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable string-keyed store of string blobs.
///
/// Implementations can store blobs in memory, on the filesystem, or in the
/// browser's local storage. Access is single-threaded and synchronous.
pub trait BlobStore {
    /// Read a blob. Absent keys yield `None`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a blob, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a blob. Deleting an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn keys(&self) -> StorageResult<Vec<String>>;
}

impl<T: BlobStore + ?Sized> BlobStore for &mut T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }
}
