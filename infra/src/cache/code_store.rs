//! Redis implementation of the verification-code store.
//!
//! Keys follow the pattern `verification:code:{identifier}`. Expiry is
//! delegated to Redis (`SET ... EX`), so a `get` after the TTL simply misses.
//! Writes overwrite; the last writer for an identifier wins.

use async_trait::async_trait;
use tracing::error;

use signet_core::services::verification::CodeStore;
use signet_core::{DomainError, DomainResult};

use super::redis_client::RedisClient;

const CODE_KEY_PREFIX: &str = "verification:code:";

/// Redis-backed verification-code store
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisCodeStore {
    /// Create a store whose entries live for `ttl_seconds`
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    fn key(identifier: &str) -> String {
        format!("{CODE_KEY_PREFIX}{identifier}")
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, identifier: &str, code: &str) -> DomainResult<()> {
        self.client
            .set_with_expiry(&Self::key(identifier), code, self.ttl_seconds)
            .await
            .map_err(|e| {
                error!("failed to store verification code: {e}");
                DomainError::internal("verification code store unavailable")
            })
    }

    async fn get(&self, identifier: &str) -> DomainResult<Option<String>> {
        self.client.get(&Self::key(identifier)).await.map_err(|e| {
            error!("failed to read verification code: {e}");
            DomainError::internal("verification code store unavailable")
        })
    }

    async fn remove(&self, identifier: &str) -> DomainResult<()> {
        self.client
            .delete(&Self::key(identifier))
            .await
            .map_err(|e| {
                error!("failed to remove verification code: {e}");
                DomainError::internal("verification code store unavailable")
            })
    }
}
