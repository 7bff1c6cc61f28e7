//! Shared application state threaded through every handler.

use std::sync::Arc;

use vprint_core::upi::UpiPayee;
use vprint_core::Tariff;
use vprint_db::Database;

use crate::adapters::DocumentQa;
use crate::config::Config;

/// Everything a handler needs, built once at startup.
pub struct AppState {
    /// Database handle (cheap to clone, internally pooled).
    pub db: Database,

    /// Resolved configuration.
    pub config: Arc<Config>,

    /// The print tariff. Fixed today; lives here so a priced tariff table
    /// can replace it without touching handlers.
    pub tariff: Tariff,

    /// Document Q&A backend. `None` when no OpenAI key is configured; the
    /// endpoint reports unavailability instead of failing at startup.
    pub qa: Option<Arc<dyn DocumentQa>>,
}

impl AppState {
    /// The UPI payee encoded into payment and recharge links.
    pub fn upi_payee(&self) -> UpiPayee {
        UpiPayee {
            vpa: self.config.upi_payee_vpa.clone(),
            name: self.config.upi_payee_name.clone(),
        }
    }
}
