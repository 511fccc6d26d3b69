//! Request-scoped authentication context.
//!
//! The context owns the raw credential material of one request plus a
//! resolve-once cache for the authenticated identity. It is created at the
//! edge, threaded explicitly through the flows that need it, and discarded
//! with the request; identity is never stashed on ambient shared state.

use tokio::sync::OnceCell;

use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult};

/// Literal scheme prefix carried before the token in the credential header.
/// Project convention; existing clients depend on it byte for byte.
pub const TOKEN_SCHEME: &str = "Token ";

/// Per-request authentication state
pub struct AuthContext {
    authorization: Option<String>,
    pub(crate) user: OnceCell<User>,
}

impl AuthContext {
    /// Context for a request carrying the given `Authorization` header value
    pub fn new(authorization: Option<String>) -> Self {
        Self {
            authorization,
            user: OnceCell::new(),
        }
    }

    /// Context for a request without credential material
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// The bearer token with the scheme prefix stripped.
    ///
    /// A missing header, a foreign scheme, and an empty token all count as
    /// absent credential material.
    pub fn token(&self) -> DomainResult<&str> {
        let header = self
            .authorization
            .as_deref()
            .ok_or(DomainError::MissingToken)?;
        let token = header
            .strip_prefix(TOKEN_SCHEME)
            .ok_or(DomainError::MissingToken)?;
        if token.is_empty() {
            return Err(DomainError::MissingToken);
        }
        Ok(token)
    }

    /// The identity resolved earlier in this request, if any
    pub fn cached_user(&self) -> Option<&User> {
        self.user.get()
    }
}
