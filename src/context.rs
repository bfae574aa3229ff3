//! Application context: every store, wired to its collaborators.
//!
//! The presentation layer receives an [`AppContext`] instead of reaching for
//! global stores. `initialize` restores persisted snapshots; `shutdown`
//! cancels pending debounced work and flushes snapshots.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::services::Services;
use crate::storage::{FileSnapshotStorage, SnapshotStorage};
use crate::stores::{AuthState, CaseDetailState, DashboardState, SearchState};

#[derive(Clone)]
pub struct AppContext {
    pub search: SearchState,
    pub case_detail: CaseDetailState,
    pub dashboard: DashboardState,
    pub auth: AuthState,
}

impl AppContext {
    pub fn initialize(
        config: &AppConfig,
        services: Services,
        storage: Arc<dyn SnapshotStorage>,
    ) -> Self {
        let context = Self {
            search: SearchState::new(services.lookup, storage.clone(), config.search.clone()),
            case_detail: CaseDetailState::new(services.cases, services.analysis),
            dashboard: DashboardState::new(storage.clone()),
            auth: AuthState::new(services.auth, storage),
        };
        info!(
            history = context.search.history().len(),
            saved_cases = context.dashboard.saved_cases().len(),
            authenticated = context.auth.is_authenticated(),
            "application context initialized"
        );
        context
    }

    /// Fixture services with file snapshots under the configured data directory
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let storage = Arc::new(FileSnapshotStorage::new(config.data_dir()?));
        Ok(Self::initialize(config, Services::fixtures(&config.fixtures), storage))
    }

    pub fn shutdown(&self) {
        self.search.shutdown();
        self.dashboard.shutdown();
        self.auth.shutdown();
        info!("application context shut down");
    }
}
