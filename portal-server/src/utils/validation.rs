//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names, notes and references
//! - Postgres TEXT has no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Store public codes
pub const MAX_STORE_CODE_LEN: usize = 32;

/// Ledger notes, withdrawal references
pub const MAX_REFERENCE_LEN: usize = 64;

/// Account holder / display names
pub const MAX_NAME_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

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
    match value {
        Some(v) if v.len() > max_len => Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Asha", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_required_text_enforces_limit() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
        let exact = "x".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&exact, "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "note", MAX_REFERENCE_LEN).is_ok());
        let long = Some("x".repeat(MAX_REFERENCE_LEN + 1));
        assert!(validate_optional_text(&long, "note", MAX_REFERENCE_LEN).is_err());
    }
}
