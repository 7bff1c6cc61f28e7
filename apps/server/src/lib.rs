//! # V-Print Hub Server
//!
//! HTTP API for the campus print service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Server Layout                                   │
//! │                                                                         │
//! │  Web Frontend ───► axum router (web/) ───► orchestration ───► vprint-db │
//! │                         │                  (payment.rs)                 │
//! │                         │                                               │
//! │                         └──► adapters/ ───► OpenAI (optional Q&A)       │
//! │                                                                         │
//! │  completion worker (worker.rs) ── periodic sweep ──► vprint-db          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - Environment-based configuration
//! - [`error`] - HTTP-facing error type
//! - [`state`] - Shared AppState
//! - [`web`] - Router and request handlers
//! - [`payment`] - Payment orchestration
//! - [`worker`] - Deferred completion sweep
//! - [`adapters`] - External service ports and implementations

pub mod adapters;
pub mod config;
pub mod error;
pub mod payment;
pub mod state;
pub mod web;
pub mod worker;

pub use config::Config;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;
