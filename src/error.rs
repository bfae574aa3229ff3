//! Error types shared by services, storage and stores.
//!
//! Service failures never escape a store: each store catches them at its
//! boundary and records the message in its `error` field.

use thiserror::Error;

/// Failures reported by the consumed service collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The case lookup rejected the query
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Entity not found with type information
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Analysis generation failed
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Login or signup rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether a single retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Unavailable(_))
    }
}

/// Failures of the snapshot storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error for '{store}': {source}")]
    Serialization {
        store: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn serialization(store: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization { store: store.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Case", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Case '42' not found");
    }

    #[test]
    fn test_transient_classification() {
        assert!(ServiceError::Timeout(100).is_transient());
        assert!(ServiceError::unavailable("offline").is_transient());
        assert!(!ServiceError::lookup("bad query").is_transient());
        assert!(!ServiceError::auth("denied").is_transient());
    }
}
