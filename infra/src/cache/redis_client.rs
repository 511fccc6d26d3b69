//! Redis cache client.
//!
//! A thin wrapper over a multiplexed async connection with bounded
//! connection retries. The multiplexed connection is internally
//! synchronized, so the client is cheap to clone and safe to share across
//! request handlers.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use signet_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Maximum connection attempts before giving up
const MAX_CONNECT_RETRIES: u32 = 3;

/// Base delay between connection attempts (doubles per attempt, capped)
const RETRY_DELAY_MS: u64 = 100;

/// Redis client for the verification-code store
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Connect to Redis with bounded retries
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("failed to parse Redis URL: {e}");
            InfrastructureError::Config(format!("invalid Redis URL: {e}"))
        })?;

        let connection = Self::connect_with_retry(client).await?;
        info!("Redis client connected");
        Ok(Self { connection })
    }

    async fn connect_with_retry(
        client: Client,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("connecting to Redis (attempt {attempts})");

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < MAX_CONNECT_RETRIES => {
                    warn!(
                        "Redis connection attempt {attempts}/{MAX_CONNECT_RETRIES} failed: {e}; \
                         retrying in {delay}ms"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("failed to connect to Redis after {attempts} attempts: {e}");
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set `key` to `value` with a time-to-live in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set_ex(key, value, expiry_seconds as usize).await?;
        Ok(())
    }

    /// Get the value of `key`, if present and unexpired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Delete `key`, ignoring whether it existed
    pub async fn delete(&self, key: &str) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
