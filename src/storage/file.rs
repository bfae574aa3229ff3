//! Snapshot files with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::SnapshotStorage;
use crate::error::StorageError;

/// One `<store>.json` file per store under a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    dir: PathBuf,
}

impl FileSnapshotStorage {
    /// The directory is created lazily on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for `store`
    pub fn snapshot_path(&self, store: &str) -> PathBuf {
        self.dir.join(format!("{}.json", store))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::io(path.display().to_string(), source)
}

impl SnapshotStorage for FileSnapshotStorage {
    fn load(&self, store: &str) -> Result<Option<Value>, StorageError> {
        let path = self.snapshot_path(store);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };
        let document =
            serde_json::from_str(&raw).map_err(|e| StorageError::serialization(store, e))?;
        Ok(Some(document))
    }

    /// Write atomically (temp file + rename)
    fn save(&self, store: &str, document: &Value) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let path = self.snapshot_path(store);
        let temp = self.dir.join(format!("{}.json.tmp", store));
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::serialization(store, e))?;
        fs::write(&temp, json).map_err(|e| io_error(&temp, e))?;
        fs::rename(&temp, &path).map_err(|e| io_error(&path, e))?;

        debug!(store, path = %path.display(), "snapshot written");
        Ok(())
    }

    fn remove(&self, store: &str) -> Result<(), StorageError> {
        let path = self.snapshot_path(store);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
