//! Error types for roster-web

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for request handling
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unrecoverable request failure
///
/// Form validation problems are never an `ApiError`; they are reported by
/// redisplaying the create form.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Storage layer fault, including an unknown group at add time
    #[error("Storage failure during {operation} ({context}): {source}")]
    Storage {
        operation: &'static str,
        context: String,
        #[source]
        source: roster_common::Error,
    },
}

impl ApiError {
    /// Storage operation that failed
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::Storage { operation, .. } => operation,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_code = match &self {
            ApiError::Storage {
                source: roster_common::Error::NotFound(_),
                ..
            } => "NOT_FOUND",
            ApiError::Storage { .. } => "STORAGE_ERROR",
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": "The request could not be completed",
            }
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
