use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use super::SnapshotStorage;
use crate::error::StorageError;

/// Process-local storage, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySnapshotStorage {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document currently held for `store`
    pub fn document(&self, store: &str) -> Option<Value> {
        self.documents.lock().get(store).cloned()
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn load(&self, store: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.document(store))
    }

    fn save(&self, store: &str, document: &Value) -> Result<(), StorageError> {
        self.documents.lock().insert(store.to_string(), document.clone());
        Ok(())
    }

    fn remove(&self, store: &str) -> Result<(), StorageError> {
        self.documents.lock().remove(store);
        Ok(())
    }
}
