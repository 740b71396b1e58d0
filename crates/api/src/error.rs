use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use meantemp_archive::ArchiveError;

/// Application-level error type for HTTP handlers.
///
/// Most routes cannot fail by design (`/temperature` maps no-data to
/// a 200 payload, `/readyz` answers 503 with a verdict); this type
/// covers the one route with real failure semantics, `/store`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A snapshot put failed (storage unreachable, auth failure).
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Archive(e) => {
                tracing::error!(error = %e, "Archive request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ARCHIVE_FAILED",
                    e.to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
