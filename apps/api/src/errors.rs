use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The first six variants are expected, user-recoverable conditions and map to
/// 4xx/502 with a stable machine-readable code. `Internal` is the fatal bucket
/// for that request only: logged in full, surfaced as a generic failure.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or expired one-time code. Deliberately a single message with no
    /// detail, so callers cannot distinguish unknown email from stale code.
    #[error("Invalid or expired code")]
    InvalidCredential,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Complete your profile before generating (full name is required)")]
    ProfileIncomplete,

    #[error("A job posting URL is required")]
    MissingUrl,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resume rendering failed")]
    RenderFailed,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIAL",
                self.to_string(),
            ),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string())
            }
            AppError::ProfileIncomplete => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PROFILE_INCOMPLETE",
                self.to_string(),
            ),
            AppError::MissingUrl => (StatusCode::BAD_REQUEST, "MISSING_URL", self.to_string()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::RenderFailed => (
                StatusCode::BAD_GATEWAY,
                "RENDER_FAILED",
                self.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
