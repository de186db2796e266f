//! File-based storage implementation for native platforms.

use super::{BlobStore, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// File-based storage for native platforms.
///
/// Stores each blob as a file in a directory. Key characters outside
/// `[A-Za-z0-9_-]` are percent-encoded in the file name.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Base directory for blob files.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/inkboard/`
    /// On Windows: `%LOCALAPPDATA%\inkboard\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("inkboard"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key.
    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", encode_key(key), EXTENSION))
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.blob_path(key);
        fs::write(&path, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut keys = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == EXTENSION).unwrap_or(false) {
                if let Some(key) = path.file_stem().and_then(|s| s.to_str()).and_then(decode_key) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
