use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::AuthService;
use crate::error::ServiceError;
use crate::models::user::is_plausible_email;
use crate::models::{AuthSession, SignupRequest, User};

/// Stand-in authentication: accepts any well-formed credentials
#[derive(Debug, Clone, Default)]
pub struct FixtureAuthService {
    latency: Duration,
}

impl FixtureAuthService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn issue_session(email: &str, first_name: String, last_name: String) -> AuthSession {
    AuthSession {
        user: User { id: Uuid::new_v4().to_string(), email: email.to_string(), first_name, last_name },
        token: Uuid::new_v4().simple().to_string(),
    }
}

/// "jane.roe@example.com" → ("Jane", "Roe")
fn names_from_email(email: &str) -> (String, String) {
    let local = email.split('@').next().unwrap_or_default();
    let mut parts = local.split(['.', '_', '-']).filter(|p| !p.is_empty()).map(capitalize);
    let first = parts.next().unwrap_or_default();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ServiceError> {
        self.simulate_latency().await;
        if !is_plausible_email(email) {
            return Err(ServiceError::auth("Invalid email address"));
        }
        if password.is_empty() {
            return Err(ServiceError::auth("Password is required"));
        }
        let (first_name, last_name) = names_from_email(email);
        Ok(issue_session(email, first_name, last_name))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ServiceError> {
        self.simulate_latency().await;
        request.validate().map_err(|problems| ServiceError::auth(problems.join("; ")))?;
        Ok(issue_session(
            &request.email,
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
        ))
    }
}
