//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use legal_case_explorer::config::SearchConfig;
use legal_case_explorer::error::ServiceError;
use legal_case_explorer::filters::SearchFilters;
use legal_case_explorer::models::{CaseAnalysis, SearchResult};
use legal_case_explorer::services::{AnalysisService, CaseLookupService};
use legal_case_explorer::storage::MemorySnapshotStorage;
use legal_case_explorer::stores::SearchState;
use parking_lot::Mutex;

/// Lookup double with per-query latency and queued failures
///
/// Successful lookups return a single result whose title is the query.
#[derive(Default)]
pub struct ScriptedLookup {
    calls: Mutex<Vec<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<HashMap<String, VecDeque<ServiceError>>>,
}

impl ScriptedLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Respond to `query` after `delay`
    pub fn delay(&self, query: &str, delay: Duration) {
        self.delays.lock().insert(query.to_string(), delay);
    }

    /// Fail the next lookup for `query` with `error`
    pub fn fail_next(&self, query: &str, error: ServiceError) {
        self.failures.lock().entry(query.to_string()).or_default().push_back(error);
    }

    /// Queries seen so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

pub fn result_for(query: &str) -> SearchResult {
    SearchResult {
        id: format!("id-{}", query),
        title: query.to_string(),
        summary: format!("Result for {}", query),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        court: None,
        jurisdiction: None,
        categories: Vec::new(),
    }
}

#[async_trait]
impl CaseLookupService for ScriptedLookup {
    async fn search(
        &self,
        query: &str,
        _filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        self.calls.lock().push(query.to_string());
        let delay = self.delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().get_mut(query).and_then(VecDeque::pop_front);
        match failure {
            Some(error) => Err(error),
            None => Ok(vec![result_for(query)]),
        }
    }
}

/// Search state over a scripted lookup and in-memory storage
pub fn search_state(lookup: &Arc<ScriptedLookup>) -> SearchState {
    search_state_with(lookup, SearchConfig::default())
}

pub fn search_state_with(lookup: &Arc<ScriptedLookup>, config: SearchConfig) -> SearchState {
    SearchState::new(lookup.clone(), Arc::new(MemorySnapshotStorage::new()), config)
}

/// Analysis double that counts calls and takes `latency` to answer
pub struct CountingAnalysis {
    pub calls: AtomicUsize,
    latency: Duration,
}

impl CountingAnalysis {
    pub fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), latency })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for CountingAnalysis {
    async fn analyze(&self, case_id: &str) -> Result<CaseAnalysis, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        Ok(CaseAnalysis {
            summary: format!("Analysis of {}", case_id),
            key_points: vec!["point".to_string()],
            legal_principles: Vec::new(),
            similar_cases: Vec::new(),
            ai_insights: String::new(),
        })
    }
}
