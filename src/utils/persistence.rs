//! Save-file persistence under ~/.houseedge/.
//!
//! Stores implement [`StateStore`]: `load` yields `None` when nothing has
//! been saved yet, and callers fall back to defaults.

use crate::core::constants::SAVE_DIR_NAME;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("could not decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadVersion { expected: u64, found: u64 },
    #[error("checksum verification failed")]
    ChecksumMismatch,
    #[error("truncated save file")]
    Truncated,
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load/save of a single value.
pub trait StateStore<T> {
    /// `Ok(None)` means nothing has been saved.
    fn load(&self) -> Result<Option<T>, StoreError>;
    fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// Load from `store`, falling back to `T::default()` when nothing is stored
/// or the stored value is unreadable.
pub fn load_or_default<T: Default>(store: &impl StateStore<T>) -> T {
    match store.load() {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(%err, "ignoring unreadable save, starting fresh");
            T::default()
        }
    }
}

/// Get the ~/.houseedge/ directory path, creating it if needed.
pub fn save_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    let dir = home_dir.join(SAVE_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.houseedge/.
pub fn save_path(filename: &str) -> Result<PathBuf, StoreError> {
    Ok(save_dir()?.join(filename))
}

/// Pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// A store for `filename` inside ~/.houseedge/.
    pub fn in_save_dir(filename: &str) -> Result<Self, StoreError> {
        Ok(Self::new(save_path(filename)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> StateStore<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Option<T>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    slot: RefCell<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            slot: RefCell::new(Some(value)),
        }
    }
}

impl<T: Clone> StateStore<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(value.clone());
        Ok(())
    }
}
