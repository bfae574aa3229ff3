//! State containers driven by the presentation layer.
//!
//! Each store exclusively owns its slice of state, converts collaborator
//! failures into its own `error` field, and persists its snapshot (if it has
//! one) synchronously after every mutation.

pub mod auth;
pub mod case_detail;
pub mod dashboard;
pub mod debounce;
pub mod search;

pub use auth::AuthState;
pub use case_detail::CaseDetailState;
pub use dashboard::DashboardState;
pub use debounce::Debouncer;
pub use search::{SearchState, SearchView};
