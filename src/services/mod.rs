//! Consumed service collaborators.
//!
//! Stores talk to the outside world only through these traits, so a real
//! backend can replace the fixture implementations without touching store logic.

pub mod auth;
pub mod fixtures;

use std::sync::Arc;

use async_trait::async_trait;

pub use auth::FixtureAuthService;
pub use fixtures::{FixtureCaseService, fixture_cases};

use crate::config::FixtureConfig;
use crate::error::ServiceError;
use crate::filters::SearchFilters;
use crate::models::{AuthSession, CaseAnalysis, CaseDetail, SearchResult, SignupRequest};

/// Resolves a query plus filters into result rows
#[async_trait]
pub trait CaseLookupService: Send + Sync {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, ServiceError>;
}

/// Loads full case records by id
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<CaseDetail, ServiceError>;
}

/// Produces an analysis for a case
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, case_id: &str) -> Result<CaseAnalysis, ServiceError>;
}

/// Stand-in login/signup collaborator
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ServiceError>;
}

/// Bundle of collaborators handed to [`crate::context::AppContext`]
#[derive(Clone)]
pub struct Services {
    pub lookup: Arc<dyn CaseLookupService>,
    pub cases: Arc<dyn CaseRepository>,
    pub analysis: Arc<dyn AnalysisService>,
    pub auth: Arc<dyn AuthService>,
}

impl Services {
    /// Fixture-backed services with simulated latency
    pub fn fixtures(config: &FixtureConfig) -> Self {
        let case_service = Arc::new(FixtureCaseService::new(config));
        Self {
            lookup: case_service.clone(),
            cases: case_service.clone(),
            analysis: case_service,
            auth: Arc::new(FixtureAuthService::new(config.latency())),
        }
    }
}
