//! Error types for nfc-checker
//!
//! - `ApiError` maps handler failures onto HTTP responses
//! - `AnalysisError` aborts a single analysis run

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Whole-run analysis failure
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// nfc-common error
    #[error("Common error: {0}")]
    Common(#[from] nfc_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Analysis(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_FAILED",
                err.to_string(),
            ),
            // Validation failures are the caller's fault
            ApiError::Common(nfc_common::Error::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
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

/// Failure that terminates one analysis run
///
/// Verifier faults are never reported here; they become fallback verdicts.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Settings could not be read at run entry
    #[error("Settings unavailable: {0}")]
    SettingsUnavailable(String),

    /// Unexpected internal failure (e.g., analysis task panicked)
    #[error("Analysis failed: {0}")]
    Internal(String),
}
