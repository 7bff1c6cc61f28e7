//! Server binary: configuration, database, adapters, worker, router, serve.

use std::sync::Arc;

use async_openai::{config::OpenAIConfig, Client};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vprint_db::{Database, DbConfig};
use vprint_server::adapters::qa_llm::OpenAiQaAdapter;
use vprint_server::adapters::DocumentQa;
use vprint_server::{web, worker, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- 1. Load configuration and set up logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to database and run migrations ---
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!(path = %config.database_path.display(), "Database ready");

    // --- 3. Initialize the optional Q&A adapter ---
    let qa: Option<Arc<dyn DocumentQa>> = match &config.openai_api_key {
        Some(key) => {
            let client = Client::with_config(OpenAIConfig::new().with_api_key(key));
            info!(model = %config.qa_model, "Document Q&A enabled");
            Some(Arc::new(OpenAiQaAdapter::new(
                client,
                config.qa_model.clone(),
            )))
        }
        None => {
            info!("No OPENAI_API_KEY set; document Q&A disabled");
            None
        }
    };

    // --- 4. Build the shared AppState ---
    let state = Arc::new(AppState {
        db: db.clone(),
        config: config.clone(),
        tariff: Default::default(),
        qa,
    });

    // --- 5. Start the completion worker ---
    let _worker = worker::spawn_completion_worker(db, config.completion_delay, config.sweep_interval);

    // --- 6. Serve ---
    let app = web::router(state);
    info!("Listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
