//! Legal Case Explorer - search and browse legal cases
//!
//! This library provides the state containers behind a case search front end:
//!
//! - [`SearchState`]: query and filter composition, debounced search, last-call-wins
//!   response ordering and a bounded search history
//! - [`CaseDetailState`]: the currently open case and on-demand analysis
//! - [`DashboardState`]: saved cases and user preferences
//! - [`AuthState`]: a stand-in login session
//!
//! Stores reach the outside world only through the service traits in [`services`],
//! and persist their snapshots through [`storage::SnapshotStorage`]. An
//! [`AppContext`] wires everything together.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use legal_case_explorer::config::AppConfig;
//! use legal_case_explorer::services::Services;
//! use legal_case_explorer::storage::MemorySnapshotStorage;
//! use legal_case_explorer::AppContext;
//!
//! # async fn demo() {
//! let config = AppConfig::default();
//! let services = Services::fixtures(&config.fixtures);
//! let context = AppContext::initialize(&config, services, Arc::new(MemorySnapshotStorage::new()));
//!
//! context.search.set_query("Smith");
//! context.search.search().await;
//! println!("Found {} cases", context.search.results().len());
//! context.shutdown();
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod stores;
pub mod utils;

// Re-export commonly used types
pub use context::AppContext;
pub use error::{ServiceError, StorageError};
pub use filters::{FilterCollection, FiltersPatch, SearchFilters, parse_filter};
pub use models::{CaseDetail, SearchHistoryItem, SearchResult};
pub use stores::{AuthState, CaseDetailState, DashboardState, SearchState};
