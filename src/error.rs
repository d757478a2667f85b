//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::DomainError;
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Field name → message, as returned to the client
pub type FieldErrors = BTreeMap<String, String>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Persistence errors, 409 or 5xx depending on cause
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error_code: String,
    pub details: FieldErrors,
}

fn single(key: &str, message: impl Into<String>) -> FieldErrors {
    BTreeMap::from([(key.to_string(), message.into())])
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", single("request", msg))
            }
            AppError::Validation(fields) => (StatusCode::BAD_REQUEST, "validation_failed", fields),

            // Domain errors are rejected before any write; all surface as 400
            AppError::Domain(domain_err) => {
                tracing::debug!(error = %domain_err, "Business rule rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    domain_err.error_code(),
                    single("cause", domain_err.to_string()),
                )
            }

            AppError::Repository(repo_err) => match repo_err {
                // 409 Conflict
                RepositoryError::Conflict(constraint) => {
                    (StatusCode::CONFLICT, "conflict", single("constraint", constraint))
                }
                // Row referenced at validation time was removed before the write
                RepositoryError::MissingReference(constraint) => (
                    StatusCode::BAD_REQUEST,
                    "missing_reference",
                    single("constraint", constraint),
                ),
                // 500 Internal Server Error
                RepositoryError::CorruptRow(msg) => {
                    tracing::error!("Corrupt row: {}", msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", FieldErrors::new())
                }
                RepositoryError::Database(e) => {
                    tracing::error!("Database error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", FieldErrors::new())
                }
            },
        };

        let title = match status {
            StatusCode::BAD_REQUEST => "Bad Request! Consult the documentation",
            StatusCode::CONFLICT => "Conflict! Consult the documentation",
            _ => "Internal Server Error",
        };

        let body = ErrorResponse {
            title: title.to_string(),
            timestamp: Utc::now(),
            status: status.as_u16(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
