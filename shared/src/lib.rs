//! Shared types for the salon backend
//!
//! Error types and the API-facing models exchanged over HTTP.
//! The server crate converts its database records into these models.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{ErrorBody, MessageResponse};
