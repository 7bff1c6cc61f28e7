//! # Completion Worker
//!
//! Background task that finishes paid print jobs.
//!
//! ## Why a Sweep, Not a Timer
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  every sweep_interval:                                               │
//! │      cutoff = now - completion_delay                                 │
//! │      UPDATE jobs SET status = 'completed'                            │
//! │      WHERE status = 'processing'                                     │
//! │        AND processing_started_at <= cutoff                           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//! The due set is derived from durable job state, not from in-process
//! timers. A job paid moments before a crash is picked up by the first
//! sweep after restart; nothing is ever lost or completed twice (the
//! `status = 'processing'` guard makes the sweep idempotent).

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use vprint_db::Database;

/// Spawns the completion worker. Runs until the runtime shuts down.
pub fn spawn_completion_worker(
    db: Database,
    completion_delay: Duration,
    sweep_interval: Duration,
) -> JoinHandle<()> {
    info!(
        delay_secs = completion_delay.as_secs(),
        interval_secs = sweep_interval.as_secs(),
        "Starting completion worker"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        // A missed tick (slow sweep) should not cause a burst of catch-up
        // sweeps; the next one covers everything anyway.
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let delay = chrono::Duration::from_std(completion_delay)
            .unwrap_or_else(|_| chrono::Duration::seconds(5));

        loop {
            ticker.tick().await;

            let cutoff = Utc::now() - delay;
            match db.jobs().complete_due(cutoff).await {
                Ok(completed) => {
                    for job_id in &completed {
                        info!(job_id = %job_id, "Print job completed");
                    }
                }
                Err(e) => {
                    // Transient storage fault: skip this sweep, the next
                    // one retries the same due set.
                    error!(error = %e, "Completion sweep failed");
                }
            }
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vprint_core::{JobStatus, PaperSize, PrintJob};
    use vprint_db::DbConfig;

    fn paid_job(user_id: &str) -> PrintJob {
        let now = Utc::now();
        PrintJob {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            file_name: "report.pdf".to_string(),
            copies: 1,
            pages: 3,
            is_color: false,
            paper_size: PaperSize::A4,
            cost_paise: 1_500,
            status: JobStatus::AwaitingPayment,
            booked_date: "2026-09-01".parse().unwrap(),
            booked_slot: "09:15".to_string(),
            created_at: now,
            updated_at: now,
            processing_started_at: None,
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_worker_completes_due_jobs() {
        let db = vprint_db::Database::new(DbConfig::in_memory()).await.unwrap();
        let job = paid_job("user-1");
        db.jobs().insert(&job).await.unwrap();

        // Started well past the delay window.
        let started = Utc::now() - chrono::Duration::seconds(60);
        db.jobs().start_processing(&job.id, started).await.unwrap();

        let handle = spawn_completion_worker(
            db.clone(),
            Duration::from_secs(5),
            Duration::from_millis(20),
        );

        // Give the worker a few sweeps.
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Completed);
        assert!(loaded.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_worker_leaves_fresh_jobs_processing() {
        let db = vprint_db::Database::new(DbConfig::in_memory()).await.unwrap();
        let job = paid_job("user-1");
        db.jobs().insert(&job).await.unwrap();
        db.jobs().start_processing(&job.id, Utc::now()).await.unwrap();

        let handle = spawn_completion_worker(
            db.clone(),
            Duration::from_secs(3600),
            Duration::from_millis(20),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, JobStatus::Processing);
    }
}
