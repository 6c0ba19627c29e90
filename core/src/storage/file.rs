use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Durable backend keeping every entry in a single JSON object file.
///
/// Each call reads the file, so several handles on one path observe each
/// other's writes. Mutations rewrite the whole file through a sibling temp
/// file and a rename. A missing file is an empty store; an unparsable file
/// fails every operation with `StorageError::Corrupt` until `clear`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

type Entries = BTreeMap<String, String>;

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the store file with `.tmp` appended to the full name.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write(&self, entries: &Entries) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(entries).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = entries.len(), "storage file written");
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.write(&Entries::new())
    }

    fn key(&self, index: usize) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.into_keys().nth(index))
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    fn entries(&self) -> Result<Vec<(String, String)>, StorageError> {
        Ok(self.read()?.into_iter().collect())
    }
}
