//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow in V-Print Hub                           │
//! │                                                                     │
//! │  Frontend                    Rust Backend                           │
//! │  ────────                    ────────────                           │
//! │                                                                     │
//! │  POST /jobs/{id}/pay                                                │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  ┌──────────────────────────────────────────────────────────────┐   │
//! │  │  Handler Function                                            │   │
//! │  │  Result<T, ApiError>                                         │   │
//! │  │         │                                                    │   │
//! │  │         ▼                                                    │   │
//! │  │  Storage fault? ─── DbError::QueryFailed ──────┐             │   │
//! │  │         │                                      │             │   │
//! │  │         ▼                                      ▼             │   │
//! │  │  Business outcome? ─ CoreError::... ───────► ApiError ─────► │   │
//! │  └──────────────────────────────────────────────────────────────┘   │
//! │                                                                     │
//! │  ◄── HTTP status + { "code": "...", "message": "..." } ──────────   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business outcomes carry user-correctable messages verbatim (the slot
//! conflict message is shown in a toast as-is); storage faults are logged in
//! full and collapsed to a generic message on the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vprint_core::{CoreError, ValidationError};
use vprint_db::DbError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is the body the frontend receives when a request fails:
/// ```json
/// {
///   "code": "SLOT_CONFLICT",
///   "message": "This time slot is already booked. Please choose another."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Requested slot is already taken (409)
    SlotConflict,

    /// Wallet balance below job cost (402)
    InsufficientFunds,

    /// Caller does not own the resource (403)
    Forbidden,

    /// Job is not in a state that allows the operation (409)
    InvalidState,

    /// Database operation failed (500)
    DatabaseError,

    /// Document Q&A is not configured on this deployment (503)
    QaUnavailable,

    /// Document Q&A backend failed to answer (502)
    QaFailed,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// HTTP status for this error's code.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::SlotConflict => StatusCode::CONFLICT,
            ErrorCode::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InvalidState => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::QaUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::QaFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field } => ApiError::new(
                ErrorCode::ValidationError,
                format!("Duplicate {}: already exists", field),
            ),
            DbError::CheckViolation { message } => {
                tracing::error!("Check constraint violation: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SlotUnavailable { .. } => {
                // The message is shown verbatim in the booking UI.
                ApiError::new(ErrorCode::SlotConflict, err.to_string())
            }
            CoreError::InsufficientBalance { balance, required } => ApiError::new(
                ErrorCode::InsufficientFunds,
                format!(
                    "Insufficient wallet balance: {} available, {} required",
                    balance, required
                ),
            ),
            CoreError::JobNotFound(id) => ApiError::not_found("Job", &id),
            CoreError::NotOwner(id) => {
                ApiError::forbidden(format!("Job {} belongs to another user", id))
            }
            CoreError::InvalidJobStatus {
                job_id,
                current_status,
            } => ApiError::new(
                ErrorCode::InvalidState,
                format!("Job {} is in {} status", job_id, current_status),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
