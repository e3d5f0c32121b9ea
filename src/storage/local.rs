//! File-backed key/value store
//!
//! Provides a `LocalStore` that keeps one JSON file per key under an
//! XDG-compliant data directory, in the spirit of browser local storage:
//! synchronous, string-keyed, and absent keys are never an error.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing the local store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Directory creation, file read or file write failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be encoded as JSON
    #[error("Failed to serialize value: {0}")]
    Serialize(serde_json::Error),

    /// The stored file exists but does not hold what we expect
    #[error("Corrupt entry for key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous key/value store backed by the filesystem
///
/// Uses `~/.local/share/econdigest/` on Linux, or the equivalent XDG path on
/// other platforms. Keys map directly to `<key>.json` files.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Directory where entries are stored
    dir: PathBuf,
}

impl LocalStore {
    /// Creates a store in the XDG data directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "econdigest")?;
        let dir = project_dirs.data_dir().to_path_buf();
        Some(Self { dir })
    }

    /// Creates a store rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory backing this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the file for the given key
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Writes a raw string under `key`, creating the directory if needed
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    /// Reads the raw string under `key`
    ///
    /// A missing key yields `Ok(None)`; other I/O failures are errors.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the entry under `key`; removing a missing key succeeds
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Serializes `value` as JSON and stores it under `key`
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value).map_err(StorageError::Serialize)?;
        self.set_item(key, &json)
    }

    /// Reads and decodes the JSON stored under `key`
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(content) = self.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }
}
