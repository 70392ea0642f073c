//! Unified error codes for the salon backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Booking errors
//! - 2xxx: Product errors
//! - 3xxx: Media provider errors
//! - 9xxx: System errors
//!
//! Codes classify failures inside the server (status mapping, logging).
//! They are not part of the HTTP error body.

use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Record changed since it was read
    VersionConflict = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Malformed record id
    InvalidId = 6,
    /// Required field missing
    RequiredField = 7,
    /// Path exists but not for this method
    MethodNotAllowed = 8,

    // ==================== 1xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 1001,

    // ==================== 2xxx: Product ====================
    /// Product not found
    ProductNotFound = 2001,
    /// Uploaded file is not an accepted image
    InvalidFile = 2002,
    /// Uploaded file exceeds the size limit
    FileTooLarge = 2003,
    /// Price is not a number
    InvalidPrice = 2004,

    // ==================== 3xxx: Media ====================
    /// Media provider credentials missing
    MediaNotConfigured = 3001,
    /// Upload to the media provider failed
    MediaUploadFailed = 3002,
    /// Deletion at the media provider failed
    MediaDeleteFailed = 3003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::VersionConflict => "Resource was modified by another request",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidId => "Invalid id",
            Self::RequiredField => "Required field missing",
            Self::MethodNotAllowed => "Method not allowed",

            Self::BookingNotFound => "Booking not found",

            Self::ProductNotFound => "Product not found",
            Self::InvalidFile => "Only image files are allowed!",
            Self::FileTooLarge => "File too large",
            Self::InvalidPrice => "Price must be a number",

            Self::MediaNotConfigured => "Media provider is not configured",
            Self::MediaUploadFailed => "Image upload failed",
            Self::MediaDeleteFailed => "Image deletion failed",

            Self::InternalError => "Something went wrong!",
            Self::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::BookingNotFound.code(), 1001);
        assert_eq!(ErrorCode::InvalidFile.code(), 2002);
        assert_eq!(ErrorCode::MediaUploadFailed.code(), 3002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E0003");
        assert_eq!(ErrorCode::InvalidFile.to_string(), "E2002");
    }

    #[test]
    fn test_invalid_file_message() {
        assert_eq!(
            ErrorCode::InvalidFile.message(),
            "Only image files are allowed!"
        );
    }
}
