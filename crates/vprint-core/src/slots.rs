//! # Slot Grid Module
//!
//! The daily printing-slot grid and its arithmetic.
//!
//! ## The Grid
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Printing Slots (per calendar day)                    │
//! │                                                                         │
//! │  09:00  09:15  09:30  09:45  10:00  ...  17:15  17:30  17:45            │
//! │  └──────────────────── 36 slots of 15 minutes ──────────────────┘       │
//! │                                                                         │
//! │  A slot is identified by its "HH:mm" start time. Bookings pair a        │
//! │  slot with a calendar day; at most one booking may hold a given         │
//! │  (day, slot) pair system-wide.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The upstream UI hides slots that are already in the past for today, but
//! nothing here assumes that: a slot string is validated against the grid
//! literally, whatever day it is paired with.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::ValidationError;

// =============================================================================
// Grid Constants
// =============================================================================

/// First slot of the day starts at 09:00.
pub const OPENING_HOUR: u32 = 9;

/// Slot length in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Slots per day: 9 hours × 4 slots per hour.
pub const SLOTS_PER_DAY: u32 = 36;

/// Per-job time allowance used for completion estimates, in minutes.
///
/// A queue of n jobs ahead pushes the estimate out by n × this value.
pub const JOB_ALLOWANCE_MINUTES: i64 = 5;

// =============================================================================
// Grid Operations
// =============================================================================

/// Returns the start time of slot `index` (0-based) within a day.
fn slot_start(index: u32) -> Option<NaiveTime> {
    if index >= SLOTS_PER_DAY {
        return None;
    }
    let minutes = index * SLOT_MINUTES;
    NaiveTime::from_hms_opt(OPENING_HOUR + minutes / 60, minutes % 60, 0)
}

/// Generates the full slot grid for one day, as "HH:mm" strings.
///
/// ## Example
/// ```rust
/// use vprint_core::slots::day_slots;
///
/// let slots = day_slots();
/// assert_eq!(slots.len(), 36);
/// assert_eq!(slots.first().map(String::as_str), Some("09:00"));
/// assert_eq!(slots.last().map(String::as_str), Some("17:45"));
/// ```
pub fn day_slots() -> Vec<String> {
    (0..SLOTS_PER_DAY)
        .filter_map(slot_start)
        .map(|t| t.format("%H:%M").to_string())
        .collect()
}

/// Parses a slot string and checks it lies on the grid.
///
/// ## Rules
/// - Format must be `HH:mm` (zero-padded, 24-hour)
/// - Must be between 09:00 and 17:45 inclusive
/// - Must be aligned to a 15-minute boundary
pub fn parse_slot(slot: &str) -> Result<NaiveTime, ValidationError> {
    let time = NaiveTime::parse_from_str(slot, "%H:%M").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "timeSlot".to_string(),
            reason: "must be HH:mm, e.g. 09:15".to_string(),
        }
    })?;

    let opening = NaiveTime::from_hms_opt(OPENING_HOUR, 0, 0).unwrap_or_default();
    let minutes_since_open = (time - opening).num_minutes();

    let on_grid = minutes_since_open >= 0
        && minutes_since_open % SLOT_MINUTES as i64 == 0
        && (minutes_since_open / SLOT_MINUTES as i64) < SLOTS_PER_DAY as i64;

    if !on_grid {
        return Err(ValidationError::NotAllowed {
            field: "timeSlot".to_string(),
            reason: "must be a 15-minute slot between 09:00 and 17:45".to_string(),
        });
    }

    Ok(time)
}

/// Estimates when a job booked into `(day, slot)` will complete, given the
/// number of jobs already queued ahead of it in the same slot.
///
/// ## Computation
/// `slot start + (jobs_ahead + 1) × JOB_ALLOWANCE_MINUTES`
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use vprint_core::slots::estimated_completion;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let eta = estimated_completion(day, "09:00", 2).unwrap();
/// assert_eq!(eta.format("%H:%M").to_string(), "09:15");
/// ```
pub fn estimated_completion(
    day: NaiveDate,
    slot: &str,
    jobs_ahead: i64,
) -> Result<NaiveDateTime, ValidationError> {
    let start = parse_slot(slot)?;
    let allowance = TimeDelta::minutes((jobs_ahead + 1) * JOB_ALLOWANCE_MINUTES);
    Ok(day.and_time(start) + allowance)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let slots = day_slots();
        assert_eq!(slots.len(), 36);
        assert_eq!(slots[0], "09:00");
        assert_eq!(slots[1], "09:15");
        assert_eq!(slots[35], "17:45");
    }

    #[test]
    fn test_parse_valid_slots() {
        for slot in day_slots() {
            assert!(parse_slot(&slot).is_ok(), "grid slot {} rejected", slot);
        }
    }

    #[test]
    fn test_parse_rejects_off_grid() {
        // Misaligned
        assert!(parse_slot("09:10").is_err());
        // Before opening
        assert!(parse_slot("08:45").is_err());
        // After the last slot
        assert!(parse_slot("18:00").is_err());
        // Malformed
        assert!(parse_slot("9am").is_err());
        assert!(parse_slot("").is_err());
        assert!(parse_slot("25:00").is_err());
    }

    #[test]
    fn test_estimated_completion_moves_with_queue() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let empty_queue = estimated_completion(day, "10:30", 0).unwrap();
        assert_eq!(empty_queue.format("%H:%M").to_string(), "10:35");

        let busy_queue = estimated_completion(day, "10:30", 4).unwrap();
        assert_eq!(busy_queue.format("%H:%M").to_string(), "10:55");
    }
}
