//! Durable per-store snapshots.
//!
//! Each store persists one opaque JSON document under its own name:
//! - `search-storage`: search history
//! - `dashboard-storage`: saved cases and preferences
//! - `auth-storage`: the stand-in login session
//!
//! Documents are wrapped in a versioned envelope; a snapshot with a different
//! version is ignored on load and the store starts from its defaults.

pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub use file::FileSnapshotStorage;
pub use memory::MemorySnapshotStorage;

use crate::error::StorageError;

/// Snapshot format version for invalidation on format changes
pub const SNAPSHOT_VERSION: u32 = 1;

pub const SEARCH_STORE: &str = "search-storage";
pub const DASHBOARD_STORE: &str = "dashboard-storage";
pub const AUTH_STORE: &str = "auth-storage";

/// Opaque key-value storage of serialized store snapshots
pub trait SnapshotStorage: Send + Sync {
    /// Raw document for `store`, or `None` if nothing was saved yet
    fn load(&self, store: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the document for `store` wholesale
    fn save(&self, store: &str, document: &Value) -> Result<(), StorageError>;

    fn remove(&self, store: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    state: T,
}

/// Load and decode a snapshot
///
/// Returns `None` when missing, version-mismatched or undecodable; the caller
/// starts from defaults. Only I/O failures are reported as errors.
pub fn load_snapshot<T: DeserializeOwned>(
    storage: &dyn SnapshotStorage,
    store: &str,
) -> Result<Option<T>, StorageError> {
    let Some(document) = storage.load(store)? else {
        return Ok(None);
    };

    let version = document.get("version").and_then(Value::as_u64);
    if version != Some(u64::from(SNAPSHOT_VERSION)) {
        warn!(store, ?version, expected = SNAPSHOT_VERSION, "snapshot version mismatch, ignoring");
        return Ok(None);
    }

    match serde_json::from_value::<Envelope<T>>(document) {
        Ok(envelope) => Ok(Some(envelope.state)),
        Err(e) => {
            warn!(store, error = %e, "snapshot unreadable, ignoring");
            Ok(None)
        }
    }
}

/// Encode and save a snapshot
pub fn save_snapshot<T: Serialize>(
    storage: &dyn SnapshotStorage,
    store: &str,
    state: &T,
) -> Result<(), StorageError> {
    let document = serde_json::to_value(Envelope { version: SNAPSHOT_VERSION, state })
        .map_err(|e| StorageError::serialization(store, e))?;
    storage.save(store, &document)
}

/// Load a snapshot, logging and swallowing any failure
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(
    storage: &dyn SnapshotStorage,
    store: &str,
) -> T {
    match load_snapshot(storage, store) {
        Ok(Some(state)) => state,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(store, error = %e, "failed to load snapshot, starting empty");
            T::default()
        }
    }
}

/// Save a snapshot, logging any failure; stores never surface storage errors
pub(crate) fn persist<T: Serialize>(storage: &dyn SnapshotStorage, store: &str, state: &T) {
    if let Err(e) = save_snapshot(storage, store, state) {
        warn!(store, error = %e, "failed to persist snapshot");
    }
}
