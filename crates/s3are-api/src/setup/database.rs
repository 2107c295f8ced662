//! Database setup and initialization

use anyhow::{Context, Result};
use s3are_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connect to the database, waiting for it to come up, and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = connect_with_retry(config).await?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

async fn connect_with_retry(config: &Config) -> Result<PgPool> {
    let max_attempts = config.db_connect_retries.max(1);
    let delay = Duration::from_secs(config.db_connect_retry_delay_secs);
    let mut attempt = 0;

    loop {
        attempt += 1;
        tracing::info!(attempt, max_attempts, "Connecting to database...");

        let result = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(&config.database_url)
            .await;

        match result {
            Ok(pool) => {
                tracing::info!(
                    max_connections = config.db_max_connections,
                    "Database connected successfully"
                );
                return Ok(pool);
            }
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    "Database not reachable yet"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to connect to database after {} attempts", attempt)
                });
            }
        }
    }
}
