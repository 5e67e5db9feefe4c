use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::hh_client::HhError;
use crate::session::messages::ALREADY_PROCESSING;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A second analysis was requested while one is still running for the same user.
    #[error("Analysis already in progress for user {0}")]
    AlreadyProcessing(i64),

    #[error("Upstream error: {0}")]
    Upstream(#[from] HhError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::AlreadyProcessing(user_id) => {
                tracing::info!("Rejected concurrent analysis for user {user_id}");
                (
                    StatusCode::CONFLICT,
                    "ALREADY_PROCESSING",
                    ALREADY_PROCESSING.to_string(),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("hh.ru error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The job search service is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
