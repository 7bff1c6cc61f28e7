//! # vprint-core: Pure Business Logic for V-Print Hub
//!
//! This crate is the **heart** of V-Print Hub. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       V-Print Hub Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend (external)                      │   │
//! │  │    Upload ──► Configure ──► Pay ──► Polling Dashboard           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    book_slot, create_job, pay_for_job, list_jobs, wallet        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vprint-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │  tariff   │  │   slots   │   │   │
//! │  │   │ PrintJob  │  │   Money   │  │ estimate  │  │  36-slot  │   │   │
//! │  │   │  Wallet   │  │  (paise)  │  │   cost    │  │   grid    │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vprint-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PrintJob, SlotBooking, Wallet, enums)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`tariff`] - Print cost estimation
//! - [`slots`] - The 15-minute slot grid and its arithmetic
//! - [`upi`] - UPI deep-link and QR image URL builders
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod slots;
pub mod tariff;
pub mod types;
pub mod upi;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vprint_core::Money` instead of
// `use vprint_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use tariff::Tariff;
pub use types::*;
