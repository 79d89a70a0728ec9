//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
/// Payload-mode "not found" answers are not errors and never pass through here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Record with the given identity was not found
    #[error("{0}")]
    NotFound(String),

    /// Query parameter carries an unsupported value
    #[error("{0}")]
    BadRequest(String),

    /// Record or parameter violates its declared bounds
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Record with the same identity already exists
    #[error("{0}")]
    Conflict(String),

    /// Document store could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::state::PersistenceError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is surfaced with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Duplicate creates answer 400, not 409
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_valid::validation::Errors> for AppError {
    fn from(errors: serde_valid::validation::Errors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
