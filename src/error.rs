use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Upper bound on error text echoed back to clients. Driver errors can run to
/// several kilobytes and may embed connection strings, so responses only ever
/// carry a capped prefix while the full text goes to the logs.
const ERROR_DETAIL_MAX_CHARS: usize = 120;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    PersistenceError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl AppError {
    /// The underlying error text without the variant label, capped for
    /// inclusion in response bodies.
    pub fn detail(&self) -> String {
        let text = match self {
            AppError::ValidationError(err) => err.to_string(),
            AppError::PersistenceError(err) => err.to_string(),
            AppError::InternalError(err) => err.to_string(),
        };
        truncate_detail(&text)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::ValidationError(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation error"),
            AppError::PersistenceError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::PersistenceError(anyhow::Error::new(err))
    }
}

/// Cap `text` at [`ERROR_DETAIL_MAX_CHARS`] characters, respecting char
/// boundaries so multi-byte text never splits mid-character.
fn truncate_detail(text: &str) -> String {
    match text.char_indices().nth(ERROR_DETAIL_MAX_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
