//! Database Migrations
//!
//! Bootstrap schema for the `users` table.

use anyhow::{Context, Result};
use deadpool_postgres::Pool;

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id            SERIAL PRIMARY KEY,
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

/// Run all pending migrations
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    tracing::info!("Running database migrations...");

    let client = pool.get().await.context("Failed to get connection for migrations")?;
    client
        .batch_execute(CREATE_USERS_TABLE)
        .await
        .context("Failed to create users table")?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check if database needs migrations
pub async fn needs_migration(pool: &Pool) -> Result<bool> {
    let client = pool.get().await.context("Failed to get DB connection")?;

    let result = client
        .query_one(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'users'",
            &[],
        )
        .await
        .context("Failed to inspect schema")?;

    let count: i64 = result.try_get(0)?;
    Ok(count == 0)
}
