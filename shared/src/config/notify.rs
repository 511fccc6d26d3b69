//! Outbound notification configuration

use serde::{Deserialize, Serialize};

/// SMTP delivery configuration for email verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// SMTP account username
    pub username: String,

    /// SMTP account password
    pub password: String,

    /// From address for outbound mail
    pub from_address: String,

    /// Send timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@signet.local"),
            timeout_seconds: default_timeout(),
        }
    }
}

impl SmtpConfig {
    /// Create the configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_smtp_port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "no-reply@signet.local".to_string()),
            timeout_seconds: std::env::var("SMTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_timeout() -> u64 {
    30
}
