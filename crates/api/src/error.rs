use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use surveydesk_core::error::CoreError;
use surveydesk_core::form::FormErrors;
use surveydesk_db::store::StoreError;

/// Application-level error type for JSON handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses. HTML pages render their own error states instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `surveydesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The response store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submitted survey failed validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidForm(FormErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::Database(err)) => {
                // Details stay in the log.
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::error!(error = %msg, "Response store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "The response store is unavailable".to_string(),
                )
            }

            AppError::InvalidForm(fields) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "fields": fields,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
