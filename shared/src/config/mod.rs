//! Configuration types for the Signet services.
//!
//! Every value the core consumes is injected through these structs; nothing
//! security-relevant is hardcoded. Each section can be loaded from the
//! process environment with its `from_env` constructor.

pub mod auth;
pub mod cache;
pub mod database;
pub mod notify;
pub mod server;
pub mod validation;

pub use auth::{AuthConfig, DriverKind, TokenConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use notify::SmtpConfig;
pub use server::ServerConfig;
pub use validation::ValidationConfig;

/// Aggregate of every configuration section consumed by the service.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub smtp: SmtpConfig,
    pub validation: ValidationConfig,
}

impl Settings {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            validation: ValidationConfig::default(),
        }
    }
}
