//! Slot booking handlers.
//!
//! The booking POST never checks availability up front. It inserts and lets
//! the storage UNIQUE constraint arbitrate: the loser of any race gets the
//! same corrective message as someone who clicked a stale grid.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use vprint_core::slots::{day_slots, parse_slot};
use vprint_core::{CoreError, SlotBooking};

use crate::error::ApiError;
use crate::state::AppState;
use crate::web::require_user;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    /// Calendar day, ISO `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Slot start, `HH:mm` on the 15-minute grid.
    pub time_slot: String,
}

/// `POST /bookings` - reserve a slot for the calling user.
pub async fn book_slot_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<SlotBooking>), ApiError> {
    let user_id = require_user(&headers)?;
    parse_slot(&req.time_slot)?;

    let booking = state
        .db
        .bookings()
        .book(&user_id, req.date, &req.time_slot)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::from(CoreError::SlotUnavailable {
                    date: req.date.to_string(),
                    time_slot: req.time_slot.clone(),
                })
            } else {
                ApiError::from(e)
            }
        })?;

    info!(user_id = %user_id, date = %req.date, slot = %req.time_slot, "Slot booked");
    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancyResponse {
    pub date: NaiveDate,
    /// The full 36-slot grid for the day.
    pub all_slots: Vec<String>,
    /// The subset already taken. The client greys these out.
    pub booked_slots: Vec<String>,
}

/// `GET /bookings/{date}` - occupancy for one day's grid.
pub async fn day_occupancy_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayOccupancyResponse>, ApiError> {
    require_user(&headers)?;

    let booked_slots = state.db.bookings().booked_slots(date).await?;

    Ok(Json(DayOccupancyResponse {
        date,
        all_slots: day_slots(),
        booked_slots,
    }))
}
