//! # Repository Modules
//!
//! Database access organized by aggregate:
//! - `wallet` - User balances (lazy creation, guarded debit)
//! - `booking` - Time slot reservations (UNIQUE-arbitrated)
//! - `job` - Print job lifecycle (guarded status transitions)
//! - `payment` - Cross-aggregate transactions (wallet debit + job start)

pub mod booking;
pub mod job;
pub mod payment;
pub mod wallet;

pub use booking::BookingRepository;
pub use job::JobRepository;
pub use payment::{DebitOutcome, PaymentRepository};
pub use wallet::WalletRepository;
