//! Checksummed binary snapshots.
//!
//! File format:
//! - Version magic (8 bytes, LE)
//! - Data length (4 bytes, LE)
//! - bincode payload (variable length)
//! - SHA-256 over the three fields above (32 bytes)

use super::persistence::{save_path, StateStore, StoreError};
use crate::core::constants::SNAPSHOT_VERSION_MAGIC;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

const HEADER_LEN: usize = 12;
const CHECKSUM_LEN: usize = 32;

/// Encode `value` into the snapshot format.
pub fn encode_snapshot<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    let data = bincode::serialize(value).map_err(StoreError::Encode)?;
    let data_len = data.len() as u32;

    let mut hasher = Sha256::new();
    hasher.update(SNAPSHOT_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    let mut out = Vec::with_capacity(HEADER_LEN + data.len() + CHECKSUM_LEN);
    out.extend_from_slice(&SNAPSHOT_VERSION_MAGIC.to_le_bytes());
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&data);
    out.extend_from_slice(&checksum);
    Ok(out)
}

/// Verify and decode a snapshot.
pub fn decode_snapshot<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(StoreError::Truncated);
    }

    let (version_bytes, rest) = bytes.split_at(8);
    let (length_bytes, rest) = rest.split_at(4);
    let mut version = [0u8; 8];
    version.copy_from_slice(version_bytes);
    let version = u64::from_le_bytes(version);
    if version != SNAPSHOT_VERSION_MAGIC {
        return Err(StoreError::BadVersion {
            expected: SNAPSHOT_VERSION_MAGIC,
            found: version,
        });
    }

    let mut length = [0u8; 4];
    length.copy_from_slice(length_bytes);
    let data_len = u32::from_le_bytes(length) as usize;
    if rest.len() != data_len + CHECKSUM_LEN {
        return Err(StoreError::Truncated);
    }
    let (data, stored_checksum) = rest.split_at(data_len);

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    if stored_checksum != hasher.finalize().as_slice() {
        return Err(StoreError::ChecksumMismatch);
    }

    bincode::deserialize(data).map_err(StoreError::Decode)
}

/// A [`StateStore`] writing checksummed snapshots to a file.
#[derive(Debug, Clone)]
pub struct ChecksummedFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ChecksummedFileStore<T> {
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

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the snapshot. Missing files are fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

impl<T: Serialize + DeserializeOwned> StateStore<T> for ChecksummedFileStore<T> {
    fn load(&self) -> Result<Option<T>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let value = decode_snapshot(&bytes)?;
        tracing::debug!(path = %self.path.display(), "loaded snapshot");
        Ok(Some(value))
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let bytes = encode_snapshot(value)?;
        fs::write(&self.path, bytes).map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addiction::{advance_day, SimulationDayState};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("houseedge-snapshot-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_and_load_simulation_state() {
        let store = ChecksummedFileStore::new(temp_path("state.dat"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        let mut state = SimulationDayState::default();
        for _ in 0..8 {
            state = advance_day(&state);
        }
        store.save(&state).expect("Failed to save simulation state");
        assert!(store.exists());

        let loaded: SimulationDayState = store.load().unwrap().expect("snapshot present");
        assert_eq!(loaded, state);

        store.clear().unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let mut bytes = encode_snapshot(&SimulationDayState::default()).unwrap();
        bytes[HEADER_LEN + 2] ^= 0xFF;
        let result: Result<SimulationDayState, _> = decode_snapshot(&bytes);
        assert!(matches!(result, Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut bytes = encode_snapshot(&42u32).unwrap();
        bytes[0] ^= 0x01;
        let result: Result<u32, _> = decode_snapshot(&bytes);
        assert!(matches!(result, Err(StoreError::BadVersion { .. })));
    }

    #[test]
    fn test_truncated_rejected() {
        let bytes = encode_snapshot(&42u32).unwrap();
        let result: Result<u32, _> = decode_snapshot(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(StoreError::Truncated)));
    }
}
