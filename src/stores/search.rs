//! Search state: query, filter selection, results and history.
//!
//! # Triggering
//!
//! Every query or filter change restarts a debounce timer. When it fires and
//! the trimmed query is non-empty, a lookup is issued. [`SearchState::search`]
//! is the explicit submission path: it cancels the pending timer and runs
//! immediately, regardless of the query.
//!
//! # Ordering
//!
//! Each lookup takes a number from a monotonically increasing counter. When a
//! response arrives and a newer lookup has been issued since, the response is
//! dropped without touching results, error, loading flag or history.
//!
//! # Failure
//!
//! A failed lookup sets `error` and clears the loading flag. Results from the
//! previous successful search are kept.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::debounce::Debouncer;
use crate::config::SearchConfig;
use crate::error::ServiceError;
use crate::filters::{FilterCollection, FiltersPatch, SearchFilters};
use crate::models::{SearchHistory, SearchHistoryItem, SearchResult};
use crate::services::CaseLookupService;
use crate::storage::{self, SEARCH_STORE, SnapshotStorage};

/// Persisted part of the search state
#[derive(Debug, Default, Serialize, Deserialize)]
struct SearchSnapshot {
    history: Vec<SearchHistoryItem>,
}

/// Consistent copy of the whole search state
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub query: String,
    pub filters: SearchFilters,
    pub results: Vec<SearchResult>,
    pub history: Vec<SearchHistoryItem>,
    pub active_filter_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct SearchData {
    query: String,
    filters: SearchFilters,
    results: Vec<SearchResult>,
    history: SearchHistory,
    is_loading: bool,
    error: Option<String>,
}

struct SearchInner {
    data: Mutex<SearchData>,
    lookup: Arc<dyn CaseLookupService>,
    storage: Arc<dyn SnapshotStorage>,
    debouncer: Debouncer,
    latest_request: AtomicU64,
    config: SearchConfig,
}

/// Cloneable handle to one search state
#[derive(Clone)]
pub struct SearchState {
    inner: Arc<SearchInner>,
}

impl SearchState {
    /// Build the state, restoring history from `search-storage`
    pub fn new(
        lookup: Arc<dyn CaseLookupService>,
        storage: Arc<dyn SnapshotStorage>,
        config: SearchConfig,
    ) -> Self {
        let snapshot: SearchSnapshot = storage::load_or_default(storage.as_ref(), SEARCH_STORE);
        let history = SearchHistory::from_entries(snapshot.history, config.history_capacity);
        debug!(entries = history.len(), "search history restored");

        let data = SearchData {
            query: String::new(),
            filters: SearchFilters::default(),
            results: Vec::new(),
            history,
            is_loading: false,
            error: None,
        };

        Self {
            inner: Arc::new(SearchInner {
                data: Mutex::new(data),
                lookup,
                storage,
                debouncer: Debouncer::new(config.debounce()),
                latest_request: AtomicU64::new(0),
                config,
            }),
        }
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.inner.data.lock().query = text.into();
        self.schedule_search();
    }

    /// Shallow-merge `patch` into the current filters
    pub fn set_filters(&self, patch: FiltersPatch) {
        self.inner.data.lock().filters.apply(patch);
        self.schedule_search();
    }

    /// Reset filters to defaults; query and results are left alone
    pub fn clear_filters(&self) {
        self.inner.data.lock().filters = SearchFilters::default();
        self.schedule_search();
    }

    /// Toggle `value` in a multi-select filter; returns whether it is now selected
    pub fn toggle(&self, collection: FilterCollection, value: &str) -> bool {
        let selected = self.inner.data.lock().filters.toggle(collection, value);
        self.schedule_search();
        selected
    }

    pub fn active_filter_count(&self) -> usize {
        self.inner.data.lock().filters.active_count()
    }

    /// Submit now, cancelling any pending debounced search
    pub async fn search(&self) {
        if self.inner.debouncer.cancel() {
            debug!("pending debounced search cancelled by submission");
        }
        self.execute().await;
    }

    pub fn clear_history(&self) {
        self.inner.data.lock().history.clear();
        self.persist();
    }

    pub fn clear_error(&self) {
        self.inner.data.lock().error = None;
    }

    /// Whether a debounced search is waiting for its timer
    pub fn has_pending_search(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Cancel the pending debounced search and flush history
    pub fn shutdown(&self) {
        self.inner.debouncer.cancel();
        self.persist();
    }

    pub fn query(&self) -> String {
        self.inner.data.lock().query.clone()
    }

    pub fn filters(&self) -> SearchFilters {
        self.inner.data.lock().filters.clone()
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.inner.data.lock().results.clone()
    }

    pub fn history(&self) -> Vec<SearchHistoryItem> {
        self.inner.data.lock().history.entries().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.data.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.data.lock().error.clone()
    }

    pub fn view(&self) -> SearchView {
        let data = self.inner.data.lock();
        SearchView {
            query: data.query.clone(),
            filters: data.filters.clone(),
            results: data.results.clone(),
            history: data.history.entries().to_vec(),
            active_filter_count: data.filters.active_count(),
            is_loading: data.is_loading,
            error: data.error.clone(),
        }
    }

    /// Restart the debounce timer
    ///
    /// The pending callback holds only a weak reference, so dropping the last
    /// handle also drops any pending search.
    fn schedule_search(&self) {
        let weak: Weak<SearchInner> = Arc::downgrade(&self.inner);
        self.inner.debouncer.schedule(async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let state = SearchState { inner };
            let idle = state.inner.data.lock().query.trim().is_empty();
            if idle {
                debug!("debounced search skipped for empty query");
                return;
            }
            state.execute().await;
        });
    }

    async fn execute(&self) {
        let request = self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let (query, filters) = {
            let mut data = self.inner.data.lock();
            data.is_loading = true;
            data.error = None;
            (data.query.clone(), data.filters.clone())
        };
        debug!(request, query = %query, "search issued");

        let outcome = self.lookup(request, &query, &filters).await;

        if !self.is_latest(request) {
            debug!(request, "discarding superseded search response");
            return;
        }

        let recorded = {
            let mut data = self.inner.data.lock();
            data.is_loading = false;
            match outcome {
                Ok(results) => {
                    info!(request, query = %query, results = results.len(), "search completed");
                    data.results = results;
                    if query.trim().is_empty() {
                        false
                    } else {
                        data.history.record(SearchHistoryItem::new(query, filters));
                        true
                    }
                }
                Err(e) => {
                    warn!(request, error = %e, "search failed");
                    data.error = Some(e.to_string());
                    false
                }
            }
        };

        if recorded {
            self.persist();
        }
    }

    fn is_latest(&self, request: u64) -> bool {
        self.inner.latest_request.load(Ordering::SeqCst) == request
    }

    /// One lookup with timeout, retried once on transient failure unless superseded
    async fn lookup(
        &self,
        request: u64,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        let attempts = if self.inner.config.retry_transient { 2 } else { 1 };
        let mut attempt = 1;
        loop {
            match self.lookup_once(query, filters).await {
                Err(e) if e.is_transient() && attempt < attempts && self.is_latest(request) => {
                    warn!(request, attempt, error = %e, "transient lookup failure, retrying");
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    async fn lookup_once(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        let call = self.inner.lookup.search(query, filters);
        match self.inner.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(ServiceError::Timeout(limit.as_millis() as u64))),
            None => call.await,
        }
    }

    fn persist(&self) {
        let snapshot = SearchSnapshot { history: self.history() };
        storage::persist(self.inner.storage.as_ref(), SEARCH_STORE, &snapshot);
    }
}
