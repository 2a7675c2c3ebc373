// Centralized error handling for the site

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors produced by the data access layer.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// The attendance join found a nickname with no birthday row. The two
    /// result sets are computed independently and joined by nickname, so a
    /// gap means the data is inconsistent and the operation fails loudly
    /// instead of dropping the user.
    #[error("No birthday record for nickname '{nickname}'")]
    BirthdayMissing { nickname: String },
}

/// Errors surfaced by request handlers.
///
/// Every variant maps to a user-safe message; storage detail is logged,
/// never echoed to the client.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Page not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid or missing CSRF token")]
    CsrfMismatch,

    #[error(transparent)]
    Data(#[from] DataError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SiteError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            SiteError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            SiteError::CsrfMismatch => (StatusCode::FORBIDDEN, self.to_string()),
            SiteError::Data(err) => {
                error!(error = %err, "Storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Service temporarily unavailable. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
