//! Input validation helpers
//!
//! Shared by the booking (JSON) and product (multipart) handlers. Both follow
//! the same partial-update convention: an absent key keeps the stored value.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: client, service, stylist, product, category
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone, date, time, status, service/stylist ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Check a present value is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Check an optional value, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Take a required field on create: it must be present and non-blank.
pub fn require_text(value: Option<String>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.ok_or_else(|| AppError::required(field))?;
    validate_required_text(&value, field, max_len)?;
    Ok(value)
}

/// Apply an update to a required field: absent keeps `current`.
pub fn merge_required_text(
    current: String,
    update: Option<String>,
    field: &str,
    max_len: usize,
) -> Result<String, AppError> {
    match update {
        Some(value) => {
            validate_required_text(&value, field, max_len)?;
            Ok(value)
        }
        None => Ok(current),
    }
}

/// Apply an update to an optional field: absent keeps `current`, empty clears.
pub fn merge_optional_text(
    current: Option<String>,
    update: Option<String>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    validate_optional_text(&update, field, max_len)?;
    Ok(match update {
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value),
        None => current,
    })
}

/// Normalize an optional field on create: empty means absent.
pub fn optional_text(value: Option<String>, field: &str, max_len: usize) -> Result<Option<String>, AppError> {
    merge_optional_text(None, value, field, max_len)
}
