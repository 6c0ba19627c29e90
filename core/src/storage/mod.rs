//! Best-effort durable key-value persistence.
//!
//! # Design
//! `StorageBackend` is the raw string-to-string surface of a local-storage
//! style store and reports every failure. `KeyValueStore` layers JSON
//! (de)serialization on top and never surfaces an error: each failure is
//! logged and turned into the operation's sentinel (`false`, `None`, an
//! empty list, or `0`). A missing key and a corrupt value therefore look the
//! same to `load`.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StorageError;

/// A synchronous, string-keyed, string-valued store.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    fn clear(&mut self) -> Result<(), StorageError>;

    /// Key at `index` in the backend's enumeration order.
    fn key(&self, index: usize) -> Result<Option<String>, StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Every key with its value. Backends that can take one consistent
    /// snapshot should override the index walk.
    fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        let len = self.len()?;
        let mut entries = Vec::with_capacity(len);
        for index in 0..len {
            let Some(key) = self.key(index)? else {
                continue;
            };
            if let Some(value) = self.get_item(&key)? {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }
}

#[derive(Debug, Default)]
pub struct KeyValueStore<B = MemoryBackend> {
    backend: B,
}

impl KeyValueStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl KeyValueStore<FileBackend> {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }
}

impl<B: StorageBackend> KeyValueStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn save<T>(&mut self, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize value");
                return false;
            }
        };
        match self.backend.set_item(key, &serialized) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to save value");
                false
            }
        }
    }

    /// `None` when the key is missing, unreadable, or not valid JSON for `T`.
    pub fn load<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is not valid JSON");
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.backend.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to remove value");
                false
            }
        }
    }

    pub fn clear(&mut self) -> bool {
        match self.backend.clear() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to clear storage");
                false
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        matches!(self.backend.get_item(key), Ok(Some(_)))
    }

    /// Every key currently present, or an empty list if enumeration fails.
    pub fn list_keys(&self) -> Vec<String> {
        self.try_entries()
            .map(|entries| entries.into_iter().map(|(key, _)| key).collect())
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to enumerate keys");
                Vec::new()
            })
    }

    /// Sum of key and value lengths in bytes, or `0` if enumeration fails.
    pub fn size_in_bytes(&self) -> usize {
        self.try_entries()
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, value)| key.len() + value.len())
                    .sum()
            })
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to measure storage");
                0
            })
    }

    fn try_entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        self.backend.entries()
    }
}
