//! Error types for each layer of the service.
//!
//! - [`RepositoryError`] - raised by storage backends
//! - [`ShortLinkError`] - raised by [`crate::application::services::ShortLinkService`]
//! - [`AppError`] - HTTP-facing error rendered as a JSON envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::url_validator::UrlValidationError;

/// Errors returned by [`crate::domain::repositories::ShortLinkRepository`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The key is already taken. Raised atomically by the insert itself.
    #[error("key already exists: {key}")]
    Conflict { key: String },

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Errors returned by the short link service.
#[derive(Debug, thiserror::Error)]
pub enum ShortLinkError {
    #[error("invalid URL: {0}")]
    InvalidInput(#[from] UrlValidationError),

    #[error("short link not found: {0}")]
    NotFound(String),

    /// The collision loop hit its attempt bound or cycled back onto a key it
    /// had already tried.
    #[error("no free key found after {attempts} attempts")]
    KeyExhaustion { attempts: usize },

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level HTTP error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortLinkError> for AppError {
    fn from(e: ShortLinkError) -> Self {
        match e {
            ShortLinkError::InvalidInput(reason) => AppError::bad_request(
                "Invalid URL format",
                json!({ "reason": reason.to_string() }),
            ),
            ShortLinkError::NotFound(key) => {
                AppError::not_found("URL not found", json!({ "key": key }))
            }
            ShortLinkError::KeyExhaustion { attempts } => AppError::internal(
                "Failed to generate unique key",
                json!({ "reason": "Too many collisions", "attempts": attempts }),
            ),
            ShortLinkError::Storage(source) => {
                tracing::error!(error = %source, "Storage failure");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_default();
        AppError::bad_request("Validation failed", details)
    }
}
