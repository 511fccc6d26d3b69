//! Database-backed repositories.

pub mod mysql;

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use signet_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Create the MySQL connection pool from configuration.
///
/// Pool acquires are bounded by the configured timeout so a saturated
/// database cannot stall the authentication path indefinitely.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await?;
    info!(
        max_connections = config.max_connections,
        "database pool created"
    );
    Ok(pool)
}
