use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::SearchFilters;

/// Default number of searches kept in history
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// One executed search, frozen at the moment it was issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub query: String,
    pub filters: SearchFilters,
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryItem {
    pub fn new(query: impl Into<String>, filters: SearchFilters) -> Self {
        Self { query: query.into(), filters, timestamp: Utc::now() }
    }
}

/// Bounded, most-recent-first list of executed searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryItem>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity }
    }

    /// Rebuild from persisted entries (assumed most-recent-first), dropping overflow
    pub fn from_entries(mut entries: Vec<SearchHistoryItem>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Insert at the front, evicting the oldest entry on overflow
    pub fn record(&mut self, item: SearchHistoryItem) {
        if self.capacity == 0 {
            return;
        }
        self.entries.insert(0, item);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[SearchHistoryItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
