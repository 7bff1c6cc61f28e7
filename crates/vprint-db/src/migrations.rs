//! # Database Migrations
//!
//! Schema migration management using sqlx's embedded migrator.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Migration System                             │
//! │                                                                 │
//! │  migrations/sqlite/           Compile time                      │
//! │  ├── 001_initial_schema.sql ──┐                                 │
//! │  └── 00N_*.sql              ──┤                                 │
//! │                               ▼                                 │
//! │                       sqlx::migrate!()                          │
//! │                       (embeds SQL in binary)                    │
//! │                               │                                 │
//! │                               ▼  Runtime (startup)              │
//! │                       MIGRATOR.run(pool)                        │
//! │                               │                                 │
//! │                               ▼                                 │
//! │                       _sqlx_migrations table                    │
//! │                       (tracks applied versions)                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Migrations are forward-only: never edit an applied migration file,
//! always add a new one.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Embedded migrations from the migrations/sqlite directory.
///
/// The path is relative to this crate's Cargo.toml.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations against the pool.
///
/// Idempotent: already-applied migrations are skipped based on the
/// `_sqlx_migrations` bookkeeping table.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!("Applying pending migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Returns the list of applied migration versions, newest last.
///
/// Useful for health/debug endpoints.
pub async fn applied_versions(pool: &SqlitePool) -> DbResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(pool)
            .await?;
    let versions: Vec<i64> = rows.into_iter().map(|(v,)| v).collect();
    info!(count = versions.len(), "Applied migrations");
    Ok(versions)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_migrations_apply_cleanly() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        // Idempotent second run
        run_migrations(&pool).await.unwrap();

        let versions = applied_versions(&pool).await.unwrap();
        assert!(!versions.is_empty());
    }

    #[tokio::test]
    async fn test_schema_tables_exist() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"wallets"));
        assert!(names.contains(&"bookings"));
        assert!(names.contains(&"jobs"));
    }
}
