//! Account field kinds and format validation.
//!
//! The patterns are injected through [`ValidationConfig`] so deployments can
//! adjust username policy or phone plans without a code change.

use regex::Regex;

use signet_shared::config::ValidationConfig;

use crate::errors::{DomainError, DomainResult};

/// The account fields subject to format and uniqueness rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Username,
    Telephone,
    Email,
}

impl FieldKind {
    /// Field name as used in validation maps and storage columns
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Username => "username",
            FieldKind::Telephone => "telephone",
            FieldKind::Email => "email",
        }
    }
}

/// Compiled per-kind format patterns
#[derive(Debug, Clone)]
pub struct FieldValidator {
    username: Regex,
    telephone: Regex,
    email: Regex,
}

impl FieldValidator {
    /// Compiles the configured patterns, failing on an invalid pattern
    pub fn new(config: &ValidationConfig) -> DomainResult<Self> {
        Ok(Self {
            username: compile(&config.username_pattern)?,
            telephone: compile(&config.telephone_pattern)?,
            email: compile(&config.email_pattern)?,
        })
    }

    /// Checks `value` against the pattern for `kind`
    pub fn is_valid(&self, value: &str, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Username => self.username.is_match(value),
            FieldKind::Telephone => self.telephone.is_match(value),
            FieldKind::Email => self.email.is_match(value),
        }
    }
}

fn compile(pattern: &str) -> DomainResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| DomainError::internal(format!("invalid validation pattern {pattern:?}: {e}")))
}
