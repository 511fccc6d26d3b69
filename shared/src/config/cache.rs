//! Cache configuration for the verification-code store

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Verification code time-to-live in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            code_ttl_seconds: default_code_ttl(),
        }
    }
}

impl CacheConfig {
    /// Create the configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            code_ttl_seconds: std::env::var("CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_code_ttl),
        }
    }
}

// Codes expire after five minutes unless configured otherwise.
fn default_code_ttl() -> u64 {
    300
}
