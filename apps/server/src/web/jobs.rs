//! Print job handlers: creation, dashboard listing, payment, QR links.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use vprint_core::slots::{estimated_completion, parse_slot};
use vprint_core::validation::validate_file_name;
use vprint_core::{upi, CoreError, JobStatus, PaperSize, PaymentMethod, PrintJob};

use crate::error::ApiError;
use crate::payment::pay_for_job;
use crate::state::AppState;
use crate::web::require_user;

// =============================================================================
// Create
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub file_name: String,
    pub copies: i64,
    pub pages: i64,
    pub is_color: bool,
    pub paper_size: PaperSize,
    /// The slot the user booked for pickup, copied by value onto the job.
    pub booked_date: NaiveDate,
    pub booked_slot: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    #[serde(flatten)]
    pub job: PrintJob,
    /// Server-side queue estimate: slot start plus a per-job allowance for
    /// every job already holding the slot.
    pub estimated_ready_at: NaiveDateTime,
}

/// `POST /jobs` - create a job in `awaiting-payment`.
///
/// The cost is always computed server-side from the tariff. A client-supplied
/// cost would never be trusted, so the request doesn't even carry one.
pub async fn create_job_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), ApiError> {
    let user_id = require_user(&headers)?;

    validate_file_name(&req.file_name)?;
    parse_slot(&req.booked_slot)?;
    let cost = state
        .tariff
        .estimate_cost(req.pages, req.copies, req.is_color)?;

    let jobs_ahead = state
        .db
        .jobs()
        .count_for_slot(req.booked_date, &req.booked_slot)
        .await?;
    let estimated_ready_at = estimated_completion(req.booked_date, &req.booked_slot, jobs_ahead)?;

    let now = Utc::now();
    let job = PrintJob {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        file_name: req.file_name.trim().to_string(),
        copies: req.copies,
        pages: req.pages,
        is_color: req.is_color,
        paper_size: req.paper_size,
        cost_paise: cost.paise(),
        status: JobStatus::AwaitingPayment,
        booked_date: req.booked_date,
        booked_slot: req.booked_slot,
        created_at: now,
        updated_at: now,
        processing_started_at: None,
        completed_at: None,
    };

    state.db.jobs().insert(&job).await?;
    info!(user_id = %user_id, job_id = %job.id, cost = %cost, "Print job created");

    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            job,
            estimated_ready_at,
        }),
    ))
}

// =============================================================================
// List
// =============================================================================

/// `GET /jobs` - the caller's jobs, newest first.
///
/// This is the dashboard's polling read: it only ever sees committed state,
/// so a job mid-payment shows as `awaiting-payment` until the transaction
/// lands, then flips.
pub async fn list_jobs_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PrintJob>>, ApiError> {
    let user_id = require_user(&headers)?;
    let jobs = state.db.jobs().list_for_user(&user_id).await?;
    Ok(Json(jobs))
}

// =============================================================================
// Pay
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayJobRequest {
    pub method: PaymentMethod,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayJobResponse {
    #[serde(flatten)]
    pub job: PrintJob,
    /// Present for wallet payments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_balance_paise: Option<i64>,
}

/// `POST /jobs/{id}/pay` - the payment orchestrator endpoint.
pub async fn pay_job_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    Json(req): Json<PayJobRequest>,
) -> Result<Json<PayJobResponse>, ApiError> {
    let user_id = require_user(&headers)?;

    let receipt = pay_for_job(&state.db, &user_id, &job_id, req.method).await?;

    Ok(Json(PayJobResponse {
        job: receipt.job,
        new_balance_paise: receipt.new_balance_paise,
    }))
}

// =============================================================================
// Payment QR
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    /// `upi://pay` deep link. Shown as a fallback if the image fails.
    pub upi_link: String,
    /// Chart-service URL rendering the link as a QR code. The client loads
    /// it directly; this server never fetches image bytes.
    pub qr_image_url: String,
}

/// `GET /jobs/{id}/payment-qr` - UPI link and QR image URL for a job.
pub async fn payment_qr_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Result<Json<QrResponse>, ApiError> {
    let user_id = require_user(&headers)?;

    let job = state
        .db
        .jobs()
        .get_by_id(&job_id)
        .await?
        .ok_or_else(|| CoreError::JobNotFound(job_id.clone()))?;

    if job.user_id != user_id {
        return Err(CoreError::NotOwner(job_id).into());
    }

    let upi_link = upi::payment_link(&state.upi_payee(), &job.id, job.cost());
    let qr_image_url = upi::qr_image_url(&upi_link);

    Ok(Json(QrResponse {
        upi_link,
        qr_image_url,
    }))
}
