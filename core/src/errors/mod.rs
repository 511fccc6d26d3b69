//! Domain-specific error types and error handling.
//!
//! Recognized taxonomy members are returned to callers for user-facing
//! translation; anything unclassified is logged at its origin and surfaced
//! only as [`DomainError::Internal`].

use std::collections::BTreeMap;

use thiserror::Error;

/// Token validation and issuance errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token generation failed")]
    Generation,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Field-level validation failures. Aggregated for registration,
    /// single-entry elsewhere.
    #[error("validation failed")]
    Validation { fields: BTreeMap<String, String> },

    #[error("account or credential mismatch")]
    CredentialMismatch,

    #[error("missing token")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("account not found")]
    NotFound,

    #[error("duplicate value for field: {field}")]
    Conflict { field: String },

    #[error("code delivery failed: {message}")]
    Gateway { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        DomainError::Validation { fields }
    }

    /// Unclassified failure, surfaced without internal detail
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_validation_helper() {
        let err = DomainError::validation("username", "too short");
        match err {
            DomainError::Validation { fields } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields["username"], "too short");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_token_error_converts_into_domain_error() {
        let err: DomainError = TokenError::Expired.into();
        assert!(matches!(err, DomainError::Token(TokenError::Expired)));
    }
}
