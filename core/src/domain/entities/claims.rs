//! Session token claims

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims carried by a signed session token.
///
/// Stateless by design: validity is determined solely by the signature and
/// `exp` at parse time, never by server-side session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username of the authenticated user
    pub sub: String,

    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,

    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `subject` expiring `expiry_seconds` from now
    pub fn new(subject: impl Into<String>, expiry_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject.into(),
            iat: now,
            exp: now + expiry_seconds,
        }
    }
}
