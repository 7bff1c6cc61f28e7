//! # Booking Repository
//!
//! Database operations for time slot reservations.
//!
//! ## Race Arbitration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Two users, same (date, "10:30") slot, racing:                  │
//! │                                                                 │
//! │  User A ── INSERT ──► row created                               │
//! │  User B ── INSERT ──► UNIQUE(slot_date, time_slot) fires        │
//! │                       └── DbError::UniqueViolation              │
//! │                           (mapped to "slot already booked"      │
//! │                            by the caller)                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//! There is deliberately no check-then-insert: the constraint IS the check.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use vprint_core::SlotBooking;

/// Repository for slot booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Reserves a slot for a user.
    ///
    /// Returns `DbError::UniqueViolation` when the `(date, slot)` pair is
    /// already taken, including when this call loses a race. The caller
    /// translates that into the user-facing conflict error.
    pub async fn book(
        &self,
        user_id: &str,
        slot_date: NaiveDate,
        time_slot: &str,
    ) -> DbResult<SlotBooking> {
        let booking = SlotBooking {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            slot_date,
            time_slot: time_slot.to_string(),
            created_at: Utc::now(),
        };

        debug!(
            user_id = %user_id,
            date = %slot_date,
            slot = %time_slot,
            "Booking time slot"
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, slot_date, time_slot, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(booking.slot_date)
        .bind(&booking.time_slot)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Returns the booked slot starts ("HH:mm") for a day, earliest first.
    ///
    /// The dashboard diffs this against the full 36-slot grid to render
    /// availability.
    pub async fn booked_slots(&self, slot_date: NaiveDate) -> DbResult<Vec<String>> {
        let slots: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT time_slot
            FROM bookings
            WHERE slot_date = ?1
            ORDER BY time_slot
            "#,
        )
        .bind(slot_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots.into_iter().map(|(s,)| s).collect())
    }

    /// Lists a user's bookings, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<SlotBooking>> {
        let bookings: Vec<SlotBooking> = sqlx::query_as(
            r#"
            SELECT id, user_id, slot_date, time_slot, created_at
            FROM bookings
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_book_and_list() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.book("user-1", day("2026-09-01"), "10:30").await.unwrap();
        repo.book("user-2", day("2026-09-01"), "10:45").await.unwrap();

        let slots = repo.booked_slots(day("2026-09-01")).await.unwrap();
        assert_eq!(slots, vec!["10:30", "10:45"]);
    }

    #[tokio::test]
    async fn test_double_booking_rejected() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.book("user-1", day("2026-09-01"), "10:30").await.unwrap();

        let err = repo
            .book("user-2", day("2026-09-01"), "10:30")
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_same_slot_different_day_allowed() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.book("user-1", day("2026-09-01"), "10:30").await.unwrap();
        repo.book("user-1", day("2026-09-02"), "10:30").await.unwrap();

        assert_eq!(repo.booked_slots(day("2026-09-01")).await.unwrap().len(), 1);
        assert_eq!(repo.booked_slots(day("2026-09-02")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_days_are_isolated() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.book("user-1", day("2026-09-01"), "09:00").await.unwrap();

        let slots = repo.booked_slots(day("2026-09-03")).await.unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_racing_inserts_have_one_winner() {
        // Both tasks share one pool, so the UNIQUE index arbitrates.
        let db = test_db().await;
        let repo_a = db.bookings();
        let repo_b = db.bookings();

        let a = tokio::spawn(async move { repo_a.book("user-a", day("2026-09-01"), "11:00").await });
        let b = tokio::spawn(async move { repo_b.book("user-b", day("2026-09-01"), "11:00").await });

        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());
        let winners = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);

        let loser = if ra.is_err() { ra } else { rb };
        assert!(matches!(loser.unwrap_err(), DbError::UniqueViolation { .. }));
    }
}
