//! # Payment Orchestrator
//!
//! Drives a print job from `awaiting-payment` to `processing`.
//!
//! ## Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  pay_for_job(user, job, method)                                      │
//! │       │                                                              │
//! │       ├── load job ── missing? ──► JobNotFound (logged)              │
//! │       ├── ownership ── mismatch? ─► NotOwner   (logged)              │
//! │       │                                                              │
//! │       ├── wallet ──► one DB transaction:                             │
//! │       │              guarded debit + guarded status transition       │
//! │       │              (insufficient funds changes nothing)            │
//! │       │                                                              │
//! │       └── upi ────► guarded status transition only                   │
//! │                     (payer self-attests; no funds verification)      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Completion is NOT scheduled here. The completion worker owns the
//! `processing -> completed` transition by sweeping durable job state, so a
//! payment committed just before a crash still completes after restart.
//!
//! The UPI path trusts the payer's confirmation. That is the service's
//! operating model, not an oversight; reconciliation happens at the counter.

use tracing::{info, warn};

use vprint_core::{CoreError, Money, PaymentMethod, PrintJob};
use vprint_db::{Database, DebitOutcome};

use crate::error::ApiError;

/// The result of a committed payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The job, reloaded after the transition.
    pub job: PrintJob,

    /// New wallet balance in paise. `None` for UPI payments, which never
    /// touch the wallet.
    pub new_balance_paise: Option<i64>,
}

/// Pays for a job on behalf of `user_id`.
pub async fn pay_for_job(
    db: &Database,
    user_id: &str,
    job_id: &str,
    method: PaymentMethod,
) -> Result<PaymentReceipt, ApiError> {
    let job = db
        .jobs()
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, job_id = %job_id, "Payment attempt for unknown job");
            CoreError::JobNotFound(job_id.to_string())
        })?;

    if job.user_id != user_id {
        warn!(user_id = %user_id, job_id = %job_id, "Payment attempt on another user's job");
        return Err(CoreError::NotOwner(job_id.to_string()).into());
    }

    let new_balance_paise = match method {
        PaymentMethod::Wallet => Some(pay_from_wallet(db, user_id, &job).await?),
        PaymentMethod::Upi => {
            confirm_upi(db, &job).await?;
            None
        }
    };

    let job = db
        .jobs()
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| CoreError::JobNotFound(job_id.to_string()))?;

    Ok(PaymentReceipt {
        job,
        new_balance_paise,
    })
}

/// Wallet path: the atomic debit-and-transition transaction.
async fn pay_from_wallet(db: &Database, user_id: &str, job: &PrintJob) -> Result<i64, ApiError> {
    // First payment may be the user's first wallet touch.
    db.wallets().get_or_create(user_id).await?;

    let outcome = db
        .payments()
        .debit_and_start_processing(user_id, &job.id, job.cost_paise)
        .await?;

    match outcome {
        DebitOutcome::Paid { new_balance_paise } => {
            info!(
                user_id = %user_id,
                job_id = %job.id,
                amount = %job.cost(),
                "Job paid from wallet"
            );
            Ok(new_balance_paise)
        }
        DebitOutcome::InsufficientFunds { balance_paise } => Err(CoreError::InsufficientBalance {
            balance: Money::from_paise(balance_paise),
            required: job.cost(),
        }
        .into()),
        DebitOutcome::JobNotPayable => Err(stale_status_error(db, &job.id).await),
    }
}

/// UPI path: self-attested confirmation, guarded transition only.
async fn confirm_upi(db: &Database, job: &PrintJob) -> Result<(), ApiError> {
    let transitioned = db
        .jobs()
        .start_processing(&job.id, chrono::Utc::now())
        .await?;

    if !transitioned {
        return Err(stale_status_error(db, &job.id).await);
    }

    info!(job_id = %job.id, amount = %job.cost(), "UPI payment confirmed by payer");
    Ok(())
}

/// Builds the wrong-state error from the job's current (post-race) status.
async fn stale_status_error(db: &Database, job_id: &str) -> ApiError {
    let current_status = match db.jobs().get_by_id(job_id).await {
        Ok(Some(job)) => job.status.to_string(),
        _ => "unknown".to_string(),
    };

    CoreError::InvalidJobStatus {
        job_id: job_id.to_string(),
        current_status,
    }
    .into()
}
