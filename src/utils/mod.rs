//! Utility modules: persistence and build info.

pub mod build_info;
pub mod persistence;
pub mod snapshot;

pub use persistence::{load_or_default, JsonFileStore, MemoryStore, StateStore, StoreError};
pub use snapshot::ChecksummedFileStore;
