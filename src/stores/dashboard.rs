//! Saved cases and user preferences.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CaseDetail, PreferencesPatch, UserPreferences};
use crate::storage::{self, DASHBOARD_STORE, SnapshotStorage};

/// Persisted dashboard document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct DashboardSnapshot {
    saved_cases: Vec<CaseDetail>,
    preferences: UserPreferences,
}

/// Cloneable handle to the dashboard state
///
/// Every mutation writes `dashboard-storage` before returning.
#[derive(Clone)]
pub struct DashboardState {
    data: Arc<Mutex<DashboardSnapshot>>,
    storage: Arc<dyn SnapshotStorage>,
}

impl DashboardState {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        let snapshot: DashboardSnapshot =
            storage::load_or_default(storage.as_ref(), DASHBOARD_STORE);
        debug!(saved = snapshot.saved_cases.len(), "dashboard restored");
        Self { data: Arc::new(Mutex::new(snapshot)), storage }
    }

    /// Bookmark a copy of `case`; returns `false` if its id is already saved
    pub fn add_saved_case(&self, case: CaseDetail) -> bool {
        {
            let mut data = self.data.lock();
            if data.saved_cases.iter().any(|saved| saved.id == case.id) {
                debug!(id = %case.id, "case already saved");
                return false;
            }
            data.saved_cases.push(case);
        }
        self.persist();
        true
    }

    /// Returns whether a case with `id` was removed
    pub fn remove_saved_case(&self, id: &str) -> bool {
        let removed = {
            let mut data = self.data.lock();
            let before = data.saved_cases.len();
            data.saved_cases.retain(|saved| saved.id != id);
            data.saved_cases.len() != before
        };
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear_saved_cases(&self) {
        self.data.lock().saved_cases.clear();
        self.persist();
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.data.lock().saved_cases.iter().any(|saved| saved.id == id)
    }

    pub fn saved_cases(&self) -> Vec<CaseDetail> {
        self.data.lock().saved_cases.clone()
    }

    pub fn update_preferences(&self, patch: PreferencesPatch) {
        self.data.lock().preferences.apply(patch);
        self.persist();
    }

    pub fn preferences(&self) -> UserPreferences {
        self.data.lock().preferences.clone()
    }

    /// Flush the current snapshot
    pub fn shutdown(&self) {
        self.persist();
    }

    fn persist(&self) {
        let snapshot = self.data.lock().clone();
        storage::persist(self.storage.as_ref(), DASHBOARD_STORE, &snapshot);
    }
}
