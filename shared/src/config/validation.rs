//! Field-validation pattern configuration
//!
//! The patterns used to validate account fields are configuration, not code:
//! deployments with different username policies or national phone plans
//! override them without touching the core.

use serde::{Deserialize, Serialize};

/// Regex patterns for account field validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Username pattern: starts with a letter, at least three characters
    #[serde(default = "default_username_pattern")]
    pub username_pattern: String,

    /// Telephone pattern: national mobile number format
    #[serde(default = "default_telephone_pattern")]
    pub telephone_pattern: String,

    /// Email pattern: standard address format
    #[serde(default = "default_email_pattern")]
    pub email_pattern: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            username_pattern: default_username_pattern(),
            telephone_pattern: default_telephone_pattern(),
            email_pattern: default_email_pattern(),
        }
    }
}

fn default_username_pattern() -> String {
    String::from(r"^[A-Za-z][A-Za-z0-9_]{2,31}$")
}

fn default_telephone_pattern() -> String {
    String::from(r"^1[3-9]\d{9}$")
}

fn default_email_pattern() -> String {
    String::from(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$")
}
