use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use packleader_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the webhook's JSON error bodies:
/// 401 and 400 carry a short `error` string; infrastructure failures map to
/// 500 with a generic message, with the detail going to the logs only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Signature missing or invalid while verification is enforced.
    #[error("Unauthorized")]
    Unauthorized,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A content-store failure (unreachable, rejected mutation, timeout).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized" }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Content store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": "An internal error occurred",
                    }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
