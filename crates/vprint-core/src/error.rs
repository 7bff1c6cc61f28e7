//! # Error Types
//!
//! Domain-specific error types for vprint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vprint-core errors (this file)                                         │
//! │  ├── CoreError        - Business-rule outcomes and misuse               │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  vprint-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  Server errors (apps/server)                                            │
//! │  └── ApiError         - What the HTTP client sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (job id, balance, slot)
//! 3. Errors are enum variants, never String
//! 4. Expected business outcomes (slot conflict, insufficient funds) are
//!    typed variants callers branch on - never retried automatically

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// `SlotUnavailable` and `InsufficientBalance` are expected, user-facing,
/// non-fatal conditions. `JobNotFound` and `NotOwner` indicate misuse or
/// tampering and are logged server-side in addition to being surfaced.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested (day, slot) pair is already reserved.
    ///
    /// ## User Workflow
    /// ```text
    /// bookSlot(2024-06-01, "09:00")
    ///      │
    ///      ▼
    /// UNIQUE(slot_date, time_slot) violated
    ///      │
    ///      ▼
    /// UI shows: "This time slot is already booked. Please choose another."
    /// ```
    #[error("This time slot is already booked. Please choose another.")]
    SlotUnavailable { date: String, time_slot: String },

    /// The wallet balance cannot cover the requested debit. The balance and
    /// the job are left untouched; the user may retry after recharging.
    #[error("Insufficient wallet balance: have {balance}, need {required}")]
    InsufficientBalance { balance: Money, required: Money },

    /// Print job cannot be found.
    #[error("Print job not found: {0}")]
    JobNotFound(String),

    /// The caller does not own the job it is trying to act on.
    #[error("Print job {0} does not belong to the requesting user")]
    NotOwner(String),

    /// The job is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Paying for a job that is already `processing` or `completed`
    /// - A double-click racing a committed payment
    #[error("Print job {job_id} is {current_status}, cannot perform operation")]
    InvalidJobStatus {
        job_id: String,
        current_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// rejection before any store mutation happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed date or slot string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} is not allowed: {reason}")]
    NotAllowed { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
