//! # Validation Module
//!
//! Input validation utilities for V-Print Hub.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                      │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request Handler (Rust)                                        │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: Business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  ├── UNIQUE(slot_date, time_slot)                                       │
//! │  └── CHECK(balance_paise >= 0)                                          │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation always happens before any store mutation.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Print Configuration Limits
// =============================================================================

/// Maximum pages in one job.
pub const MAX_PAGES: i64 = 500;

/// Maximum copies of one job.
pub const MAX_COPIES: i64 = 100;

/// Maximum length of an uploaded file name.
pub const MAX_FILE_NAME_LEN: usize = 255;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a page count.
///
/// ## Rules
/// - Must be between 1 and 500
///
/// ## Example
/// ```rust
/// use vprint_core::validation::validate_pages;
///
/// assert!(validate_pages(10).is_ok());
/// assert!(validate_pages(0).is_err());
/// assert!(validate_pages(501).is_err());
/// ```
pub fn validate_pages(pages: i64) -> ValidationResult<()> {
    if !(1..=MAX_PAGES).contains(&pages) {
        return Err(ValidationError::OutOfRange {
            field: "pages".to_string(),
            min: 1,
            max: MAX_PAGES,
        });
    }

    Ok(())
}

/// Validates a copy count.
///
/// ## Rules
/// - Must be between 1 and 100
pub fn validate_copies(copies: i64) -> ValidationResult<()> {
    if !(1..=MAX_COPIES).contains(&copies) {
        return Err(ValidationError::OutOfRange {
            field: "copies".to_string(),
            min: 1,
            max: MAX_COPIES,
        });
    }

    Ok(())
}

/// Validates a recharge/payment amount in paise.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_amount_paise(paise: i64) -> ValidationResult<()> {
    if paise <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an uploaded file name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 255 characters
///
/// ## Example
/// ```rust
/// use vprint_core::validation::validate_file_name;
///
/// assert!(validate_file_name("thesis-final.pdf").is_ok());
/// assert!(validate_file_name("").is_err());
/// ```
pub fn validate_file_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "fileName".to_string(),
        });
    }

    if name.len() > MAX_FILE_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "fileName".to_string(),
            max: MAX_FILE_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an opaque user identifier.
///
/// User ids come from the session layer (an external collaborator), so the
/// only rule is that one is actually present.
pub fn validate_user_id(user_id: &str) -> ValidationResult<()> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "userId".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pages() {
        assert!(validate_pages(1).is_ok());
        assert!(validate_pages(500).is_ok());

        assert!(validate_pages(0).is_err());
        assert!(validate_pages(-10).is_err());
        assert!(validate_pages(501).is_err());
    }

    #[test]
    fn test_validate_copies() {
        assert!(validate_copies(1).is_ok());
        assert!(validate_copies(100).is_ok());

        assert!(validate_copies(0).is_err());
        assert!(validate_copies(101).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("notes.pdf").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("uid-abc123").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("  ").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount_paise(100).is_ok());
        assert!(validate_amount_paise(0).is_err());
        assert!(validate_amount_paise(-50).is_err());
    }
}
