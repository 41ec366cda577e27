//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Every check
//! runs before the first write of a request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use std::str::FromStr;

// ── Text length limits ──────────────────────────────────────────────

/// Titles of companies, departments and stat titles
pub const MAX_TITLE_LEN: usize = 200;

/// Slugs (URL path segments)
pub const MAX_SLUG_LEN: usize = 200;

/// Free-text overviews
pub const MAX_OVERVIEW_LEN: usize = 5000;

/// Usernames and first names
pub const MAX_NAME_LEN: usize = 150;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate that a string is within the length limit (empty allowed).
pub fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a slug: non-empty, `[A-Za-z0-9_-]+`.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_required_text(slug, "slug", MAX_SLUG_LEN)?;
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AppError::new(ErrorCode::InvalidSlug).with_detail("slug", slug));
    }
    Ok(())
}

/// Validate an email address (shape only: `local@domain.tld`).
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "Enter a valid email address",
        )
        .with_detail("field", "email"));
    }
    Ok(())
}

/// Validate a new password.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    validate_len(password, "password", MAX_PASSWORD_LEN)
}

/// Parse a decimal amount typed into a form field.
///
/// A comma decimal separator is accepted (`"2,5"`).
pub fn parse_amount(raw: &str) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::required("amount"));
    }
    Decimal::from_str(&trimmed.replace(',', "."))
        .map_err(|_| AppError::new(ErrorCode::InvalidAmount).with_detail("field", "amount"))
}

/// Parse a `YYYY-MM-DD` date typed into a form field.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::required("date"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| AppError::new(ErrorCode::InvalidDate).with_detail("field", "date"))
}
