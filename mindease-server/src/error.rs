//! Error types for mindease-server
//!
//! Every failure reaching a handler becomes a JSON error body; nothing
//! panics on a provider failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::AnalysisError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Empty required input (400)
    #[error("Input missing: {0}")]
    InputMissing(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Speech recognizer produced nothing (422)
    #[error("No speech recognized: {0}")]
    NoRecognitionResult(String),

    /// Upstream provider failed (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InputMissing(msg) => ApiError::InputMissing(msg),
            AnalysisError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AnalysisError::ServiceUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            AnalysisError::NoRecognitionResult(msg) => ApiError::NoRecognitionResult(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::InputMissing(msg) => (StatusCode::BAD_REQUEST, "INPUT_MISSING", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NoRecognitionResult(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_RECOGNITION_RESULT",
                msg,
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
