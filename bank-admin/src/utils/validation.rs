//! Input validation helpers
//!
//! Text length limits and the checks shared by the CRUD handlers. Every
//! helper returns the cleaned value so handlers build their store fields in
//! one pass.

use shared::error::{AppError, ErrorCode};
use shared::util::non_blank;

// ── Text length limits ──────────────────────────────────────────────

/// Person, branch and position names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

pub const MAX_ADDRESS_LEN: usize = 500;

/// Transaction descriptions
pub const MAX_NOTE_LEN: usize = 500;

fn too_long(field: &str, len: usize, max_len: usize) -> AppError {
    AppError::validation(format!("{field} is too long ({len} chars, max {max_len})"))
        .with_detail("field", field)
}

/// Trimmed, non-empty and within the length limit
pub fn required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = non_blank(Some(value)).ok_or_else(|| AppError::required(field))?;
    if value.chars().count() > max_len {
        return Err(too_long(field, value.chars().count(), max_len));
    }
    Ok(value.to_string())
}

/// Trimmed, `None` when blank, within the length limit when present
pub fn optional_text(
    value: Option<String>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match non_blank(value.as_deref()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max_len => Err(too_long(field, v.chars().count(), max_len)),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// One of a closed list of values, compared exactly after trimming
pub fn one_of(value: &str, field: &str, allowed: &[&str]) -> Result<String, AppError> {
    let value = non_blank(Some(value)).ok_or_else(|| AppError::required(field))?;
    if !allowed.contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be one of {}",
            allowed.join(", ")
        ))
        .with_detail("field", field)
        .with_detail("allowed", allowed.to_vec()));
    }
    Ok(value.to_string())
}

/// Finite and strictly greater than zero
pub fn positive(value: f64, field: &str) -> Result<f64, AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!("{field} must be greater than zero"))
            .with_detail("field", field));
    }
    Ok(value)
}

/// Finite and zero or more
pub fn non_negative(value: f64, field: &str) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    Ok(value)
}

/// Exactly 16 ASCII digits after trimming
pub fn card_number(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.len() != 16 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::new(ErrorCode::InvalidCardNumber).with_detail("field", "number"));
    }
    Ok(value.to_string())
}
