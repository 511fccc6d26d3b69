//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Token lifetime in seconds
    pub expiry_seconds: i64,

    /// Signing algorithm (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            expiry_seconds: 7200, // 2 hours
            algorithm: default_algorithm(),
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_seconds = minutes * 60;
        self
    }

    /// Check whether the default development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}

/// Which login driver the service runs with.
///
/// The active variant is chosen once at startup; adding a stateful
/// session-store driver means adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Stateless signed-token sessions
    Token,
}

impl Default for DriverKind {
    fn default() -> Self {
        DriverKind::Token
    }
}

impl std::str::FromStr for DriverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(DriverKind::Token),
            other => Err(format!("unknown auth driver: {other}")),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing configuration
    pub token: TokenConfig,

    /// Active login driver
    #[serde(default)]
    pub driver: DriverKind,

    /// bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Hosts that post-login redirects may target
    #[serde(default)]
    pub redirect_allow_hosts: Vec<String>,
}

impl AuthConfig {
    /// Create the configuration from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("TOKEN_SECRET")
            .unwrap_or_else(|_| "development-secret-change-in-production".to_string());
        let expiry_seconds = std::env::var("TOKEN_EXPIRY_SECONDS")
            .unwrap_or_else(|_| "7200".to_string())
            .parse()
            .unwrap_or(7200);
        // Unknown driver names fall back to the token driver rather than
        // aborting startup.
        let driver = std::env::var("AUTH_DRIVER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let redirect_allow_hosts = std::env::var("REDIRECT_ALLOW_HOSTS")
            .map(|v| {
                v.split(',')
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            token: TokenConfig {
                secret,
                expiry_seconds,
                algorithm: std::env::var("TOKEN_ALGORITHM")
                    .unwrap_or_else(|_| default_algorithm()),
            },
            driver,
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_bcrypt_cost),
            redirect_allow_hosts,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            driver: DriverKind::default(),
            bcrypt_cost: default_bcrypt_cost(),
            redirect_allow_hosts: Vec::new(),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_bcrypt_cost() -> u32 {
    12
}
