//! # vprint-db: Database Layer for V-Print Hub
//!
//! This crate provides database access for the V-Print Hub backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       V-Print Hub Data Flow                             │
//! │                                                                         │
//! │  HTTP Handler (POST /jobs/{id}/pay)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     vprint-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │    │    │
//! │  │   │               │    │ WalletRepo    │    │              │    │    │
//! │  │   │ SqlitePool    │◄───│ BookingRepo   │    │ 001_init.sql │    │    │
//! │  │   │ WAL mode      │    │ JobRepo       │    │              │    │    │
//! │  │   │               │    │ PaymentRepo   │    │              │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (vprint.db, WAL)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (wallet, booking, job, payment)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vprint_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("vprint.db")).await?;
//!
//! let wallet = db.wallets().get_or_create("user-1").await?;
//! let jobs = db.jobs().list_for_user("user-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::booking::BookingRepository;
pub use repository::job::JobRepository;
pub use repository::payment::{DebitOutcome, PaymentRepository};
pub use repository::wallet::WalletRepository;
