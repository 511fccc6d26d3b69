//! # Signet Infrastructure
//!
//! Concrete collaborators behind the core traits: the MySQL credential
//! repository, the Redis verification-code store, and the outbound
//! notification gateways.

pub mod cache;
pub mod database;
pub mod notify;

use thiserror::Error;

/// Infrastructure-level errors.
///
/// These never cross the core boundary directly: trait implementations log
/// the full detail and surface only the matching domain taxonomy member.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("mail delivery error: {0}")]
    Mail(String),

    #[error("sms delivery error: {0}")]
    Sms(String),

    #[error("configuration error: {0}")]
    Config(String),
}
