//! # Domain Types
//!
//! Core domain types used throughout V-Print Hub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    PrintJob     │   │   SlotBooking   │   │     Wallet      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  user_id (PK)   │       │
//! │  │  status         │   │  slot_date      │   │  balance_paise  │       │
//! │  │  cost_paise     │   │  time_slot      │   │                 │       │
//! │  │  booked_date/…  │   │  user_id        │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   JobStatus     │   │ PaymentMethod   │   │   PaperSize     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  AwaitingPayment│   │  Wallet         │   │  A4             │       │
//! │  │  Processing     │   │  Upi            │   │  Letter         │       │
//! │  │  Completed      │   └─────────────────┘   └─────────────────┘       │
//! │  │  Failed         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Slot Decoupling
//! A `PrintJob` copies its slot's date and time *by value* at creation.
//! Jobs and bookings have independent lifecycles; deleting a booking (out of
//! scope today) would never orphan a job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Job Status
// =============================================================================

/// The lifecycle state of a print job.
///
/// ## State Machine
/// ```text
/// awaiting-payment ──(payment commits)──► processing ──(deferred)──► completed
/// ```
/// `Failed` is part of the taxonomy but no implemented path produces it: a
/// rejected wallet debit leaves the job in `AwaitingPayment` so the user can
/// retry. It is reserved for a future payment-gateway callback or device
/// error signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "kebab-case"))]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    /// Job created, payment not yet made.
    AwaitingPayment,
    /// Payment committed; the job is on the print queue.
    Processing,
    /// Printing finished (terminal).
    Completed,
    /// Reserved: no implemented transition produces this state.
    Failed,
}

impl JobStatus {
    /// The wire/storage name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::AwaitingPayment => "awaiting-payment",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::AwaitingPayment
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a job is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// In-app wallet balance (atomic debit).
    Wallet,
    /// External UPI transfer, confirmed by the payer (no server-side funds
    /// verification).
    Upi,
}

// =============================================================================
// Paper Size
// =============================================================================

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaperSize {
    A4,
    Letter,
}

// =============================================================================
// Print Job
// =============================================================================

/// One print order, owned by exactly one user.
///
/// History is permanent: jobs are never deleted, only transitioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user (opaque session-derived identifier).
    pub user_id: String,

    /// Uploaded document name, as shown on the dashboard.
    pub file_name: String,

    /// Number of copies (1-100).
    pub copies: i64,

    /// Number of pages (1-500).
    pub pages: i64,

    /// Color or black & white.
    pub is_color: bool,

    /// Paper size.
    pub paper_size: PaperSize,

    /// Total cost in paise, computed server-side from the tariff.
    pub cost_paise: i64,

    /// Lifecycle state.
    pub status: JobStatus,

    /// Reserved slot day, copied from the booking at creation.
    pub booked_date: NaiveDate,

    /// Reserved slot start ("HH:mm"), copied from the booking at creation.
    pub booked_slot: String,

    /// When the job was created.
    pub created_at: DateTime<Utc>,

    /// When the job was last transitioned.
    pub updated_at: DateTime<Utc>,

    /// When payment committed and printing began. Drives the deferred
    /// completion sweep.
    pub processing_started_at: Option<DateTime<Utc>>,

    /// When printing finished.
    pub completed_at: Option<DateTime<Utc>>,
}

impl PrintJob {
    /// Returns the job cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_paise(self.cost_paise)
    }

    /// Whether the job is still waiting for payment.
    #[inline]
    pub fn is_payable(&self) -> bool {
        self.status == JobStatus::AwaitingPayment
    }
}

// =============================================================================
// Slot Booking
// =============================================================================

/// A reservation of one `(day, time slot)` pair.
///
/// Global invariant: at most one booking per pair, enforced by a UNIQUE
/// constraint in storage. First come, first served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SlotBooking {
    pub id: String,
    pub user_id: String,
    /// Calendar day, the canonical day representation (no time-of-day).
    pub slot_date: NaiveDate,
    /// Slot start, "HH:mm" on the 15-minute grid.
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Wallet
// =============================================================================

/// Starting balance granted on first wallet access: ₹500.00.
pub const STARTING_BALANCE_PAISE: i64 = 50_000;

/// A user's stored balance, the internal payment instrument.
///
/// Invariant: `balance_paise >= 0` at all times. The only mutation is the
/// guarded debit during wallet payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub user_id: String,
    pub balance_paise: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Returns the balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_paise(self.balance_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
