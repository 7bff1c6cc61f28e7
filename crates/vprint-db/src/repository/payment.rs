//! # Payment Repository
//!
//! The one cross-aggregate transaction in the system: wallet debit plus job
//! transition, committed together or not at all.
//!
//! ## Transaction Shape
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                             │
//! │    1. UPDATE wallets SET balance = balance - cost                  │
//! │       WHERE user_id = ? AND balance_paise >= cost                  │
//! │         └── 0 rows ──► InsufficientFunds (rollback)                │
//! │    2. UPDATE jobs SET status = 'processing'                        │
//! │       WHERE id = ? AND status = 'awaiting-payment'                 │
//! │         └── 0 rows ──► JobNotPayable (rollback, debit undone)      │
//! │  COMMIT                                                            │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//! Both guards live in the WHERE clauses, so concurrent double-pay attempts
//! resolve inside SQLite: one transaction wins both updates, the other sees
//! zero rows on the job guard and rolls its debit back. Money can never
//! leave the wallet without the job starting, and vice versa.
//!
//! The `CHECK (balance_paise >= 0)` column constraint backstops the balance
//! guard; a negative wallet is unrepresentable even if this code regresses.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use vprint_core::JobStatus;

/// Outcome of an atomic wallet debit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebitOutcome {
    /// Debit and job transition both committed.
    Paid { new_balance_paise: i64 },
    /// Balance below cost; nothing changed.
    InsufficientFunds { balance_paise: i64 },
    /// Job was not in `awaiting-payment` (already paid or completed);
    /// nothing changed.
    JobNotPayable,
}

/// Repository for payment transactions.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Atomically debits `cost_paise` from the user's wallet and moves the
    /// job from awaiting-payment to processing.
    ///
    /// The wallet row must already exist (callers go through
    /// `WalletRepository::get_or_create` first).
    pub async fn debit_and_start_processing(
        &self,
        user_id: &str,
        job_id: &str,
        cost_paise: i64,
    ) -> DbResult<DebitOutcome> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let debit = sqlx::query(
            r#"
            UPDATE wallets
            SET balance_paise = balance_paise - ?1, updated_at = ?2
            WHERE user_id = ?3 AND balance_paise >= ?1
            "#,
        )
        .bind(cost_paise)
        .bind(now)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if debit.rows_affected() == 0 {
            // Fetch the current balance for the error message, then drop
            // the transaction (implicit rollback).
            let balance: Option<(i64,)> =
                sqlx::query_as("SELECT balance_paise FROM wallets WHERE user_id = ?1")
                    .bind(user_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            debug!(user_id = %user_id, job_id = %job_id, "Wallet debit rejected");
            return Ok(DebitOutcome::InsufficientFunds {
                balance_paise: balance.map(|(b,)| b).unwrap_or(0),
            });
        }

        let transition = sqlx::query(
            r#"
            UPDATE jobs
            SET status = ?1, processing_started_at = ?2, updated_at = ?2
            WHERE id = ?3 AND status = ?4
            "#,
        )
        .bind(JobStatus::Processing)
        .bind(now)
        .bind(job_id)
        .bind(JobStatus::AwaitingPayment)
        .execute(&mut *tx)
        .await?;

        if transition.rows_affected() == 0 {
            // Job raced into a non-payable state; undo the debit.
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!(job_id = %job_id, "Job not payable, debit rolled back");
            return Ok(DebitOutcome::JobNotPayable);
        }

        let (new_balance,): (i64,) =
            sqlx::query_as("SELECT balance_paise FROM wallets WHERE user_id = ?1")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            user_id = %user_id,
            job_id = %job_id,
            amount_paise = cost_paise,
            new_balance_paise = new_balance,
            "Wallet payment committed"
        );

        Ok(DebitOutcome::Paid {
            new_balance_paise: new_balance,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;
    use vprint_core::{PaperSize, PrintJob, STARTING_BALANCE_PAISE};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seeded_job(db: &Database, user_id: &str, cost_paise: i64) -> PrintJob {
        db.wallets().get_or_create(user_id).await.unwrap();
        let now = Utc::now();
        let job = PrintJob {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            file_name: "notes.pdf".to_string(),
            copies: 2,
            pages: 10,
            is_color: true,
            paper_size: PaperSize::A4,
            cost_paise,
            status: JobStatus::AwaitingPayment,
            booked_date: "2026-09-01".parse().unwrap(),
            booked_slot: "10:30".to_string(),
            created_at: now,
            updated_at: now,
            processing_started_at: None,
            completed_at: None,
        };
        db.jobs().insert(&job).await.unwrap();
        job
    }

    #[tokio::test]
    async fn test_successful_payment_debits_and_transitions() {
        let db = test_db().await;
        let job = seeded_job(&db, "user-1", 30_000).await;

        let outcome = db
            .payments()
            .debit_and_start_processing("user-1", &job.id, 30_000)
            .await
            .unwrap();

        // 500.00 - 300.00 = 200.00
        assert_eq!(
            outcome,
            DebitOutcome::Paid {
                new_balance_paise: 20_000
            }
        );

        let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Processing);
        assert!(loaded.processing_started_at.is_some());
    }

    #[tokio::test]
    async fn test_insufficient_funds_changes_nothing() {
        let db = test_db().await;
        let job = seeded_job(&db, "user-1", STARTING_BALANCE_PAISE + 1).await;

        let outcome = db
            .payments()
            .debit_and_start_processing("user-1", &job.id, STARTING_BALANCE_PAISE + 1)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DebitOutcome::InsufficientFunds {
                balance_paise: STARTING_BALANCE_PAISE
            }
        );

        // Balance untouched, job still payable.
        let wallet = db.wallets().get("user-1").await.unwrap().unwrap();
        assert_eq!(wallet.balance_paise, STARTING_BALANCE_PAISE);
        let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::AwaitingPayment);
    }

    #[tokio::test]
    async fn test_exact_balance_succeeds() {
        let db = test_db().await;
        let job = seeded_job(&db, "user-1", STARTING_BALANCE_PAISE).await;

        let outcome = db
            .payments()
            .debit_and_start_processing("user-1", &job.id, STARTING_BALANCE_PAISE)
            .await
            .unwrap();

        assert_eq!(outcome, DebitOutcome::Paid { new_balance_paise: 0 });
    }

    #[tokio::test]
    async fn test_closed_pool_surfaces_transaction_failure() {
        let db = test_db().await;
        let job = seeded_job(&db, "user-1", 10_000).await;
        let payments = db.payments();

        db.close().await;

        let err = payments
            .debit_and_start_processing("user-1", &job.id, 10_000)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::TransactionFailed(_)));
    }

    #[tokio::test]
    async fn test_double_pay_rolls_back_second_debit() {
        let db = test_db().await;
        let job = seeded_job(&db, "user-1", 10_000).await;
        let payments = db.payments();

        let first = payments
            .debit_and_start_processing("user-1", &job.id, 10_000)
            .await
            .unwrap();
        assert!(matches!(first, DebitOutcome::Paid { .. }));

        let second = payments
            .debit_and_start_processing("user-1", &job.id, 10_000)
            .await
            .unwrap();
        assert_eq!(second, DebitOutcome::JobNotPayable);

        // Only one debit survived.
        let wallet = db.wallets().get("user-1").await.unwrap().unwrap();
        assert_eq!(wallet.balance_paise, STARTING_BALANCE_PAISE - 10_000);
    }
}
