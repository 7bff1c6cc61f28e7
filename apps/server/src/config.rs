//! Application configuration, loaded from environment variables at startup.
//!
//! A `.env` file is honored for local development. Every value has a sane
//! default except the OpenAI key, which is genuinely optional: without it the
//! server runs with the document Q&A endpoint disabled.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration loading failures. The server refuses to start on any of
/// these rather than limping along with a half-parsed setup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration resolved once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to. `BIND_ADDRESS`, default `0.0.0.0:8080`.
    pub bind_address: SocketAddr,

    /// SQLite database file. `DATABASE_PATH`, default `vprint.db`.
    pub database_path: PathBuf,

    /// How long a paid job stays `processing` before the worker completes
    /// it. `COMPLETION_DELAY_SECS`, default 5.
    pub completion_delay: Duration,

    /// How often the completion worker sweeps. `SWEEP_INTERVAL_SECS`,
    /// default 1.
    pub sweep_interval: Duration,

    /// UPI virtual payment address payments are directed to.
    /// `UPI_PAYEE_VPA`, default `vprinthub@upi`.
    pub upi_payee_vpa: String,

    /// Payee display name shown in UPI apps. `UPI_PAYEE_NAME`,
    /// default `V-Print Hub`.
    pub upi_payee_name: String,

    /// OpenAI API key for document Q&A. `OPENAI_API_KEY`, optional.
    pub openai_api_key: Option<String>,

    /// Model for document Q&A. `QA_MODEL`, default `gpt-4o-mini`.
    pub qa_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Looks for a `.env` file in the current directory for development;
    /// skipped under test to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("vprint.db"));

        let completion_delay = parse_secs("COMPLETION_DELAY_SECS", 5)?;
        let sweep_interval = parse_secs("SWEEP_INTERVAL_SECS", 1)?;

        let upi_payee_vpa =
            std::env::var("UPI_PAYEE_VPA").unwrap_or_else(|_| "vprinthub@upi".to_string());
        let upi_payee_name =
            std::env::var("UPI_PAYEE_NAME").unwrap_or_else(|_| "V-Print Hub".to_string());

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let qa_model = std::env::var("QA_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            bind_address,
            database_path,
            completion_delay,
            sweep_interval,
            upi_payee_vpa,
            upi_payee_name,
            openai_api_key,
            qa_model,
        })
    }
}

fn parse_secs(var: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(Duration::from_secs(default)),
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidValue(var.to_string(), e.to_string())),
    }
}
