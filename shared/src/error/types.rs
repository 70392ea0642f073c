//! Error type and its HTTP rendering

use super::codes::ErrorCode;
use crate::response::ErrorBody;
use http::StatusCode;
use thiserror::Error;

/// Application error with an error code and an optional underlying cause
///
/// - `code` drives the HTTP status and the log level
/// - `message` is shown to the caller
/// - `source_text` carries the underlying error text for server-side failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Text of the underlying error, if any
    pub source_text: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            source_text: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_text: None,
        }
    }

    /// Attach the underlying error text
    pub fn with_source(mut self, source: impl ToString) -> Self {
        self.source_text = Some(source.to_string());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required-field error naming the field
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Create a malformed id error
    pub fn invalid_id(resource: &str, id: &str) -> Self {
        Self::with_message(ErrorCode::InvalidId, format!("Invalid {resource} id: {id}"))
    }

    /// Create a version conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::VersionConflict, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error; the detail becomes the underlying text
    pub fn database(detail: impl ToString) -> Self {
        Self::new(ErrorCode::DatabaseError).with_source(detail)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if self.code.category().is_server_side() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                source = ?self.source_text,
                "Request failed"
            );
        }

        let body = ErrorBody {
            message: self.message,
            error: self.source_text,
        };

        (status, Json(body)).into_response()
    }
}
