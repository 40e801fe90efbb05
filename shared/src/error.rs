use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can surface. Each maps to exactly one response; there
/// is no retry anywhere, a failed request is reported immediately.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body did not parse as the expected JSON.
    #[error("malformed request body: {0}")]
    Validation(#[from] serde_json::Error),

    /// Missing/invalid session cookie or rejected identity assertion.
    #[error("authentication required")]
    Authentication,

    /// Unknown resource id.
    #[error("not found")]
    NotFound,

    /// Document store round-trip failed.
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    /// Could not reach or parse the remote identity verifier.
    #[error("verifier error: {0}")]
    Verifier(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Authentication => {
                (StatusCode::FORBIDDEN, "Authentication required").into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            err => {
                tracing::error!("request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
