//! HTTP surface: router assembly and request identity.
//!
//! Authentication lives outside this service. Every request arrives with an
//! `x-user-id` header set by the session layer in front of us; handlers
//! treat it as an opaque owner key and thread it explicitly into every
//! operation.

pub mod bookings;
pub mod jobs;
pub mod qa;
pub mod wallet;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use vprint_core::validation::validate_user_id;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/bookings", post(bookings::book_slot_handler))
        .route("/bookings/{date}", get(bookings::day_occupancy_handler))
        .route("/jobs", post(jobs::create_job_handler))
        .route("/jobs", get(jobs::list_jobs_handler))
        .route("/jobs/{id}/pay", post(jobs::pay_job_handler))
        .route("/jobs/{id}/payment-qr", get(jobs::payment_qr_handler))
        .route("/wallet", get(wallet::wallet_handler))
        .route("/wallet/recharge-qr", get(wallet::recharge_qr_handler))
        .route("/qa", post(qa::qa_handler))
        .layer(cors)
        .with_state(state)
}

/// Extracts and validates the caller identity from `x-user-id`.
pub fn require_user(headers: &HeaderMap) -> Result<String, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::validation("x-user-id header is required"))?;

    validate_user_id(user_id)?;
    Ok(user_id.to_string())
}

/// Liveness probe: verifies the database answers and reports schema state.
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.db.health_check().await {
        return Err(ApiError::internal("Database unreachable"));
    }

    let migrations = state.db.applied_migrations().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "migrationsApplied": migrations.len(),
    })))
}

// =============================================================================
// Unit Tests
// =============================================================================
