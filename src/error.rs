//! Error types for the key-value service
//!
//! Provides unified error handling using thiserror. Not-found on the read
//! path is modeled as `Ok(None)` at the coordinator; the `NotFound` variant
//! here exists for the HTTP layer to produce a 404. Invariant violations in
//! the cache (size over capacity) are asserts, not error values.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Kv Error Enum ==
/// Unified error type for the key-value service.
#[derive(Error, Debug)]
pub enum KvError {
    /// Key not found in the cache or the backing store
    #[error("key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store connectivity or query failure; transient, surfaced
    /// verbatim to the caller, never retried here
    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),
}

// Driver errors all count as transient store failures.
impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        KvError::StoreUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            KvError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            KvError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            KvError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key-value service.
pub type Result<T> = std::result::Result<T, KvError>;
