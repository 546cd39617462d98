//! Durable key-value storage for navigation state.
//!
//! Every operation returns a `Result`; callers decide whether a failure
//! matters. The navigator logs and ignores them.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store refuses access (disabled, quota, read-only).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// File system I/O error.
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("corrupt storage file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Encoding the state failed.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Read the value for `key`, `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store. Can be switched into a failing mode to simulate
/// disabled storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    failing: bool,
}

impl MemoryStore {
    /// Empty, working store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every call fails with [`StorageError::Unavailable`].
    pub fn failing() -> Self {
        Self {
            values: HashMap::new(),
            failing: true,
        }
    }

    /// Toggle failure mode.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Unavailable("memory store disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file on disk.
///
/// The file is re-read on every call so separate processes see each other's
/// writes. Writes go through a temporary file and a rename. A corrupt file
/// fails `load` but is replaced by the next `save`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Corrupt { path, message }) => {
                warn!(path = %path.display(), error = %message, "replacing corrupt state file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}
