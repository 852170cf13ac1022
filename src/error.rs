//! API error type and HTTP status mapping
//!
//! Every lower-level failure reaching the boundary becomes one of these
//! kinds. Responses are `{"error": ..., "details": ...}` JSON objects; no
//! stack traces cross the boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enrich::EnrichError;
use crate::service::ServiceError;
use crate::validate::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body (400)
    #[error("invalid request payload")]
    Decode(String),

    /// Name rule violation (400)
    #[error("invalid name format")]
    Validation(#[from] ValidationError),

    /// Unrecognized sex filter value (400)
    #[error("invalid sex value, must be 'male' or 'female'")]
    InvalidSex,

    /// Referenced user does not exist (404)
    #[error("user not found")]
    UserNotFound,

    /// One of the inference lookups failed (424)
    #[error("failed to enrich user data")]
    Enrichment(#[from] EnrichError),

    /// Storage failure (500); `context` names the failed operation
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: ServiceError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::Decode(details) => (StatusCode::BAD_REQUEST, Some(details.clone())),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, Some(err.to_string())),
            ApiError::InvalidSex => (StatusCode::BAD_REQUEST, None),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, None),
            ApiError::Enrichment(err) => (StatusCode::FAILED_DEPENDENCY, Some(err.to_string())),
            ApiError::Storage { source, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(source.to_string()))
            }
        };

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
