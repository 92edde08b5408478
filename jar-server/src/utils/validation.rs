//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for titles, notes, descriptions
//! - SQLite TEXT has no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Jar and suggestion titles
pub const MAX_TITLE_LEN: usize = 200;

/// Descriptions, free-form location text
pub const MAX_TEXT_LEN: usize = 1000;

/// Display names
pub const MAX_NAME_LEN: usize = 100;

/// Contact numbers (E.164 plus formatting slack)
pub const MAX_CONTACT_LEN: usize = 20;

/// Minimum digits for a contact number
pub const MIN_CONTACT_DIGITS: usize = 10;

/// Accepted cost tiers
pub const COST_TIERS: &[&str] = &["$", "$$", "$$$", "$$$$", "Free"];

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
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

/// Validate a cost tier value against the accepted set.
pub fn validate_cost_tier(value: &Option<String>) -> Result<(), AppError> {
    if let Some(v) = value
        && !COST_TIERS.contains(&v.as_str())
    {
        return Err(AppError::validation(format!(
            "cost_tier must be one of {COST_TIERS:?}, got '{v}'"
        )));
    }
    Ok(())
}

/// Normalize a contact number: strip formatting, keep digits and leading '+'.
///
/// 校验最少 10 位数字，保证同一号码的不同书写形式归一到一条会员记录。
pub fn normalize_contact(raw: &str) -> Result<String, AppError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_CONTACT_DIGITS {
        return Err(AppError::validation(format!(
            "Contact number must have at least {MIN_CONTACT_DIGITS} digits"
        )));
    }
    if cleaned.len() > MAX_CONTACT_LEN {
        return Err(AppError::validation(format!(
            "Contact number is too long (max {MAX_CONTACT_LEN} chars)"
        )));
    }
    Ok(cleaned)
}
