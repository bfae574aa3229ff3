//! Data models for the case explorer.
//!
//! - [`CaseDetail`] / [`CaseAnalysis`] - full case records and on-demand analysis
//! - [`SearchResult`] - summary rows returned by the lookup service
//! - [`SearchHistoryItem`] / [`SearchHistory`] - bounded record of executed searches
//! - [`UserPreferences`] - dashboard settings
//! - [`User`] / [`AuthSession`] - stand-in login session

pub mod case;
pub mod history;
pub mod preferences;
pub mod search;
pub mod user;

pub use case::{CaseAnalysis, CaseDetail, CaseStatus, Parties, SimilarCase};
pub use history::{DEFAULT_HISTORY_CAPACITY, SearchHistory, SearchHistoryItem};
pub use preferences::{DefaultView, PreferencesPatch, SortOrder, Theme, UserPreferences};
pub use search::SearchResult;
pub use user::{AuthSession, SignupRequest, User};
