//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::DatabaseConfig;

/// Seconds to wait for a free connection before failing a request
const ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Create a new database connection pool and verify it answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(&config.url)
        .await?;

    ping(&pool).await?;
    tracing::info!(max_connections = config.max_connections, "Database pool ready");

    Ok(pool)
}

/// Round-trip a trivial query
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
