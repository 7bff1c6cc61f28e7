//! # Job Repository
//!
//! Database operations for print jobs.
//!
//! ## Job Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. CREATE                                                          │
//! │     └── insert() → PrintJob { status: AwaitingPayment }             │
//! │                                                                     │
//! │  2. PAYMENT COMMITS                                                 │
//! │     └── wallet: PaymentRepository::debit_and_start_processing()     │
//! │     └── upi:    start_processing() (guarded transition)             │
//! │                                                                     │
//! │  3. COMPLETION SWEEP (background worker)                            │
//! │     └── complete_due(cutoff) → processing jobs past cutoff          │
//! │         become Completed                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every status transition is a guarded UPDATE (`WHERE status = ...`) and the
//! caller checks `rows_affected`. A repeated or stale transition is a no-op
//! at the SQL level, never a clobber.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vprint_core::{JobStatus, PrintJob};

const SELECT_JOB: &str = r#"
    SELECT id, user_id, file_name, copies, pages, is_color, paper_size,
           cost_paise, status, booked_date, booked_slot,
           created_at, updated_at, processing_started_at, completed_at
    FROM jobs
"#;

/// Repository for print job database operations.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    /// Creates a new JobRepository.
    pub fn new(pool: SqlitePool) -> Self {
        JobRepository { pool }
    }

    /// Inserts a complete job record.
    pub async fn insert(&self, job: &PrintJob) -> DbResult<()> {
        debug!(id = %job.id, user_id = %job.user_id, cost_paise = job.cost_paise, "Inserting job");

        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, user_id, file_name, copies, pages, is_color, paper_size,
                cost_paise, status, booked_date, booked_slot,
                created_at, updated_at, processing_started_at, completed_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&job.id)
        .bind(&job.user_id)
        .bind(&job.file_name)
        .bind(job.copies)
        .bind(job.pages)
        .bind(job.is_color)
        .bind(job.paper_size)
        .bind(job.cost_paise)
        .bind(job.status)
        .bind(job.booked_date)
        .bind(&job.booked_slot)
        .bind(job.created_at)
        .bind(job.updated_at)
        .bind(job.processing_started_at)
        .bind(job.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a job by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PrintJob>> {
        let job: Option<PrintJob> =
            sqlx::query_as(&format!("{SELECT_JOB} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(job)
    }

    /// Lists a user's jobs, newest first (dashboard order).
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<PrintJob>> {
        let jobs: Vec<PrintJob> = sqlx::query_as(&format!(
            "{SELECT_JOB} WHERE user_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Counts jobs holding a given slot, for queue-position estimates.
    pub async fn count_for_slot(&self, booked_date: NaiveDate, booked_slot: &str) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM jobs WHERE booked_date = ?1 AND booked_slot = ?2",
        )
        .bind(booked_date)
        .bind(booked_slot)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Guarded transition: awaiting-payment -> processing.
    ///
    /// Returns `true` if the transition happened, `false` if the job was not
    /// in `awaiting-payment` (already paid, completed, or mid-payment on
    /// another connection).
    pub async fn start_processing(&self, id: &str, at: DateTime<Utc>) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = ?1, processing_started_at = ?2, updated_at = ?2
            WHERE id = ?3 AND status = ?4
            "#,
        )
        .bind(JobStatus::Processing)
        .bind(at)
        .bind(id)
        .bind(JobStatus::AwaitingPayment)
        .execute(&self.pool)
        .await?;

        let transitioned = result.rows_affected() == 1;
        if transitioned {
            debug!(id = %id, "Job moved to processing");
        }
        Ok(transitioned)
    }

    /// Completes every processing job whose print window has elapsed.
    ///
    /// A job is due when `processing_started_at <= cutoff`. Returns the IDs
    /// of the jobs flipped to `completed`, so the worker can log them.
    ///
    /// One UPDATE over DB state: survives restarts, and a job paid just
    /// before a crash still completes on the next sweep.
    pub async fn complete_due(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<String>> {
        let now = Utc::now();

        let ids: Vec<(String,)> = sqlx::query_as(
            r#"
            UPDATE jobs
            SET status = ?1, completed_at = ?2, updated_at = ?2
            WHERE status = ?3 AND processing_started_at <= ?4
            RETURNING id
            "#,
        )
        .bind(JobStatus::Completed)
        .bind(now)
        .bind(JobStatus::Processing)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;
    use uuid::Uuid;
    use vprint_core::PaperSize;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_job(user_id: &str) -> PrintJob {
        let now = Utc::now();
        PrintJob {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            file_name: "thesis.pdf".to_string(),
            copies: 2,
            pages: 10,
            is_color: true,
            paper_size: PaperSize::A4,
            cost_paise: 30_000,
            status: JobStatus::AwaitingPayment,
            booked_date: "2026-09-01".parse().unwrap(),
            booked_slot: "10:30".to_string(),
            created_at: now,
            updated_at: now,
            processing_started_at: None,
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.jobs();

        let job = sample_job("user-1");
        repo.insert(&job).await.unwrap();

        let loaded = repo.get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, job.id);
        assert_eq!(loaded.cost_paise, 30_000);
        assert_eq!(loaded.status, JobStatus::AwaitingPayment);
        assert_eq!(loaded.booked_slot, "10:30");
        assert!(loaded.is_color);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_owner_scoped() {
        let db = test_db().await;
        let repo = db.jobs();

        let mut first = sample_job("user-1");
        first.created_at = Utc::now() - Duration::seconds(60);
        first.updated_at = first.created_at;
        let second = sample_job("user-1");
        let other = sample_job("user-2");

        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();
        repo.insert(&other).await.unwrap();

        let jobs = repo.list_for_user("user-1").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, second.id);
        assert_eq!(jobs[1].id, first.id);
    }

    #[tokio::test]
    async fn test_start_processing_is_guarded() {
        let db = test_db().await;
        let repo = db.jobs();

        let job = sample_job("user-1");
        repo.insert(&job).await.unwrap();

        assert!(repo.start_processing(&job.id, Utc::now()).await.unwrap());
        // Second attempt is a no-op, not a clobber.
        assert!(!repo.start_processing(&job.id, Utc::now()).await.unwrap());

        let loaded = repo.get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Processing);
        assert!(loaded.processing_started_at.is_some());
    }

    #[tokio::test]
    async fn test_complete_due_respects_cutoff() {
        let db = test_db().await;
        let repo = db.jobs();

        let due = sample_job("user-1");
        let fresh = sample_job("user-1");
        repo.insert(&due).await.unwrap();
        repo.insert(&fresh).await.unwrap();

        let long_ago = Utc::now() - Duration::seconds(30);
        repo.start_processing(&due.id, long_ago).await.unwrap();
        repo.start_processing(&fresh.id, Utc::now()).await.unwrap();

        // Cutoff 5 seconds in the past: only the old job is due.
        let cutoff = Utc::now() - Duration::seconds(5);
        let completed = repo.complete_due(cutoff).await.unwrap();
        assert_eq!(completed, vec![due.id.clone()]);

        let done = repo.get_by_id(&due.id).await.unwrap().unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        assert!(done.completed_at.is_some());

        let waiting = repo.get_by_id(&fresh.id).await.unwrap().unwrap();
        assert_eq!(waiting.status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn test_complete_due_skips_unpaid_jobs() {
        let db = test_db().await;
        let repo = db.jobs();

        let unpaid = sample_job("user-1");
        repo.insert(&unpaid).await.unwrap();

        let completed = repo.complete_due(Utc::now()).await.unwrap();
        assert!(completed.is_empty());

        let loaded = repo.get_by_id(&unpaid.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::AwaitingPayment);
    }

    #[tokio::test]
    async fn test_count_for_slot() {
        let db = test_db().await;
        let repo = db.jobs();

        repo.insert(&sample_job("user-1")).await.unwrap();
        repo.insert(&sample_job("user-2")).await.unwrap();

        let date: NaiveDate = "2026-09-01".parse().unwrap();
        assert_eq!(repo.count_for_slot(date, "10:30").await.unwrap(), 2);
        assert_eq!(repo.count_for_slot(date, "11:00").await.unwrap(), 0);
    }
}
