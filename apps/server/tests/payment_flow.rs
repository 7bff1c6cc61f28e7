//! End-to-end payment scenarios over an in-memory database:
//! book a slot, create a job, pay, and let the sweep complete it.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use vprint_core::{JobStatus, Money, PaperSize, PaymentMethod, PrintJob, Tariff};
use vprint_db::{Database, DbConfig};
use vprint_server::payment::pay_for_job;
use vprint_server::worker::spawn_completion_worker;
use vprint_server::ErrorCode;

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn slot_day() -> NaiveDate {
    "2026-09-01".parse().unwrap()
}

/// Mirrors job creation: server-side cost from the tariff, slot copied by
/// value, status starts at awaiting-payment.
async fn create_job(db: &Database, user_id: &str, pages: i64, copies: i64, is_color: bool) -> PrintJob {
    let cost = Tariff::default()
        .estimate_cost(pages, copies, is_color)
        .unwrap();

    let now = Utc::now();
    let job = PrintJob {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        file_name: "assignment.pdf".to_string(),
        copies,
        pages,
        is_color,
        paper_size: PaperSize::A4,
        cost_paise: cost.paise(),
        status: JobStatus::AwaitingPayment,
        booked_date: slot_day(),
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
async fn happy_path_wallet_payment_and_completion() {
    let db = test_db().await;

    // Book a pickup slot.
    db.bookings()
        .book("user-1", slot_day(), "10:30")
        .await
        .unwrap();

    // 10 pages x 2 copies, color: (5.00 + 10.00) * 10 * 2 = 300.00
    let job = create_job(&db, "user-1", 10, 2, true).await;
    assert_eq!(job.cost(), Money::from_rupees(300));

    // Pay from the wallet: 500.00 - 300.00 = 200.00.
    let receipt = pay_for_job(&db, "user-1", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap();
    assert_eq!(receipt.new_balance_paise, Some(20_000));
    assert_eq!(receipt.job.status, JobStatus::Processing);

    let wallet = db.wallets().get("user-1").await.unwrap().unwrap();
    assert_eq!(wallet.balance_paise, 20_000);

    // A short delay and a fast sweep stand in for the real timings.
    let handle = spawn_completion_worker(
        db.clone(),
        Duration::from_millis(50),
        Duration::from_millis(20),
    );
    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.abort();

    let done = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(done.status, JobStatus::Completed);
    assert!(done.completed_at.is_some());
}

#[tokio::test]
async fn insufficient_funds_changes_nothing() {
    let db = test_db().await;

    // 50 pages x 10 copies, color: 15.00 * 500 = 750.00 > 500.00 balance.
    let job = create_job(&db, "user-1", 50, 10, true).await;

    let err = pay_for_job(&db, "user-1", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientFunds);

    // Balance untouched, job still payable, retry works after nothing else
    // changed.
    let wallet = db.wallets().get("user-1").await.unwrap().unwrap();
    assert_eq!(wallet.balance_paise, 50_000);
    let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(loaded.status, JobStatus::AwaitingPayment);
}

#[tokio::test]
async fn upi_payment_never_touches_the_wallet() {
    let db = test_db().await;
    let job = create_job(&db, "user-1", 3, 1, false).await;

    let receipt = pay_for_job(&db, "user-1", &job.id, PaymentMethod::Upi)
        .await
        .unwrap();
    assert_eq!(receipt.new_balance_paise, None);
    assert_eq!(receipt.job.status, JobStatus::Processing);

    // No wallet was ever created for this user.
    assert!(db.wallets().get("user-1").await.unwrap().is_none());
}

#[tokio::test]
async fn paying_twice_is_rejected_without_double_debit() {
    let db = test_db().await;
    let job = create_job(&db, "user-1", 2, 1, false).await;

    pay_for_job(&db, "user-1", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap();

    let err = pay_for_job(&db, "user-1", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);

    // Exactly one debit of 2 x 5.00 = 10.00.
    let wallet = db.wallets().get("user-1").await.unwrap().unwrap();
    assert_eq!(wallet.balance_paise, 50_000 - 1_000);
}

#[tokio::test]
async fn paying_another_users_job_is_forbidden() {
    let db = test_db().await;
    let job = create_job(&db, "user-1", 2, 1, false).await;

    let err = pay_for_job(&db, "intruder", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    let loaded = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(loaded.status, JobStatus::AwaitingPayment);
}

#[tokio::test]
async fn paying_an_unknown_job_is_not_found() {
    let db = test_db().await;

    let err = pay_for_job(&db, "user-1", "no-such-job", PaymentMethod::Wallet)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn double_booking_is_first_come_first_served() {
    let db = test_db().await;

    db.bookings()
        .book("user-1", slot_day(), "10:30")
        .await
        .unwrap();

    let err = db
        .bookings()
        .book("user-2", slot_day(), "10:30")
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    // Only the winner holds the slot.
    let slots = db.bookings().booked_slots(slot_day()).await.unwrap();
    assert_eq!(slots, vec!["10:30"]);
}

#[tokio::test]
async fn pending_completion_survives_a_worker_restart() {
    let db = test_db().await;
    let job = create_job(&db, "user-1", 1, 1, false).await;

    pay_for_job(&db, "user-1", &job.id, PaymentMethod::Wallet)
        .await
        .unwrap();

    // No worker was running when payment committed. Starting one later
    // (as after a crash) still completes the job from durable state.
    tokio::time::sleep(Duration::from_millis(120)).await;
    let handle = spawn_completion_worker(
        db.clone(),
        Duration::from_millis(50),
        Duration::from_millis(20),
    );
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    let done = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
    assert_eq!(done.status, JobStatus::Completed);
}
