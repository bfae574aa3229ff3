//! Stand-in login session.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::models::{AuthSession, SignupRequest, User};
use crate::services::AuthService;
use crate::storage::{self, AUTH_STORE, SnapshotStorage};

/// Persisted auth document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct AuthSnapshot {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
}

#[derive(Debug, Default)]
struct AuthData {
    session: Option<AuthSession>,
    is_loading: bool,
    error: Option<String>,
}

/// Cloneable handle to the auth state
#[derive(Clone)]
pub struct AuthState {
    data: Arc<Mutex<AuthData>>,
    auth: Arc<dyn AuthService>,
    storage: Arc<dyn SnapshotStorage>,
}

impl AuthState {
    /// Restore the session from `auth-storage`; a snapshot missing either the
    /// user or the token counts as logged out
    pub fn new(auth: Arc<dyn AuthService>, storage: Arc<dyn SnapshotStorage>) -> Self {
        let snapshot: AuthSnapshot = storage::load_or_default(storage.as_ref(), AUTH_STORE);
        let session = match (snapshot.is_authenticated, snapshot.user, snapshot.token) {
            (true, Some(user), Some(token)) => Some(AuthSession { user, token }),
            _ => None,
        };
        Self {
            data: Arc::new(Mutex::new(AuthData { session, ..Default::default() })),
            auth,
            storage,
        }
    }

    pub async fn login(&self, email: &str, password: &str) {
        self.begin();
        let outcome = self.auth.login(email, password).await;
        self.finish(outcome);
    }

    pub async fn signup(&self, request: &SignupRequest) {
        self.begin();
        let outcome = self.auth.signup(request).await;
        self.finish(outcome);
    }

    pub fn logout(&self) {
        {
            let mut data = self.data.lock();
            data.session = None;
            data.error = None;
        }
        info!("logged out");
        self.persist();
    }

    pub fn clear_error(&self) {
        self.data.lock().error = None;
    }

    pub fn user(&self) -> Option<User> {
        self.data.lock().session.as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.data.lock().session.as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.lock().session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.data.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.data.lock().error.clone()
    }

    /// Flush the current snapshot
    pub fn shutdown(&self) {
        self.persist();
    }

    fn begin(&self) {
        let mut data = self.data.lock();
        data.is_loading = true;
        data.error = None;
    }

    fn finish(&self, outcome: Result<AuthSession, ServiceError>) {
        let authenticated = {
            let mut data = self.data.lock();
            data.is_loading = false;
            match outcome {
                Ok(session) => {
                    info!(email = %session.user.email, "authenticated");
                    data.session = Some(session);
                    true
                }
                Err(e) => {
                    warn!(error = %e, "authentication failed");
                    data.error = Some(e.to_string());
                    false
                }
            }
        };
        if authenticated {
            self.persist();
        }
    }

    fn persist(&self) {
        let snapshot = {
            let data = self.data.lock();
            AuthSnapshot {
                user: data.session.as_ref().map(|s| s.user.clone()),
                token: data.session.as_ref().map(|s| s.token.clone()),
                is_authenticated: data.session.is_some(),
            }
        };
        storage::persist(self.storage.as_ref(), AUTH_STORE, &snapshot);
    }
}
