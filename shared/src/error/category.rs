//! Error category classification

use super::codes::ErrorCode;

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Booking errors
/// - 2xxx: Product errors
/// - 3xxx: Media provider errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Booking errors (1xxx)
    Booking,
    /// Product errors (2xxx)
    Product,
    /// Media provider errors (3xxx)
    Media,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Booking,
            2000..3000 => Self::Product,
            3000..4000 => Self::Media,
            _ => Self::System,
        }
    }

    /// Failures the server owns; these are logged when rendered
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::Media | Self::System)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
