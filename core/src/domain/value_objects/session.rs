//! Session artifacts produced by the login drivers

use serde::{Deserialize, Serialize};

/// The session artifact returned to callers on successful login.
///
/// Serialized as a JSON body, or flattened into query parameters when the
/// caller supplied a redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Signed session token
    pub token: String,
}

impl SessionPayload {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Payload fields as query parameters for redirect-style logins
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![("token", &self.token)]
    }
}

/// Outcome of a login flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Return the session payload as the response body
    Session(SessionPayload),
    /// Redirect the caller to this URL, payload flattened into the query
    Redirect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_to_token_field() {
        let payload = SessionPayload::new("abc.def.ghi");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "token": "abc.def.ghi" }));
    }

    #[test]
    fn test_query_pairs_cover_every_field() {
        let payload = SessionPayload::new("abc");
        assert_eq!(payload.query_pairs(), vec![("token", "abc")]);
    }
}
