//! # Wallet Repository
//!
//! Database operations for user wallets.
//!
//! ## Lazy Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  get_or_create(user_id)                                         │
//! │       │                                                         │
//! │       ├── INSERT OR IGNORE (balance = ₹500.00)                  │
//! │       │      first call creates, later calls are no-ops         │
//! │       │                                                         │
//! │       └── SELECT ── always returns the persisted row            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//! Two racing first reads both succeed and observe the same single row;
//! the starting balance is granted exactly once.
//!
//! The only balance mutation lives in the payment repository, inside the
//! payment transaction. This module is read/create only.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vprint_core::{Wallet, STARTING_BALANCE_PAISE};

/// Repository for wallet database operations.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    pool: SqlitePool,
}

impl WalletRepository {
    /// Creates a new WalletRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WalletRepository { pool }
    }

    /// Returns the user's wallet, creating it with the starting balance on
    /// first access.
    ///
    /// Idempotent and race-safe: `INSERT OR IGNORE` on the primary key means
    /// concurrent first calls create exactly one row.
    pub async fn get_or_create(&self, user_id: &str) -> DbResult<Wallet> {
        let now = Utc::now();

        let inserted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO wallets (user_id, balance_paise, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(user_id)
        .bind(STARTING_BALANCE_PAISE)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 1 {
            debug!(user_id = %user_id, "Created wallet with starting balance");
        }

        let wallet: Wallet = sqlx::query_as(
            r#"
            SELECT user_id, balance_paise, created_at, updated_at
            FROM wallets
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(wallet)
    }

    /// Gets a wallet without creating it. Returns None if the user has
    /// never accessed their wallet.
    pub async fn get(&self, user_id: &str) -> DbResult<Option<Wallet>> {
        let wallet: Option<Wallet> = sqlx::query_as(
            r#"
            SELECT user_id, balance_paise, created_at, updated_at
            FROM wallets
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallet)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
