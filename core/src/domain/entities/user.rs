//! User entity representing a registered account in the Signet system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `username` and `telephone` are unique across all users; `email` is unique
/// when present. The password hash never leaves the process: it is skipped
/// during serialization and the plaintext is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name; also the token subject
    pub username: String,

    /// National mobile number usable as a login account
    pub telephone: String,

    /// Optional email address usable as a login account
    pub email: Option<String>,

    /// bcrypt hash of the user's password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(
        username: String,
        telephone: String,
        email: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            telephone,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "alice".to_string(),
            "13800000000".to_string(),
            Some("alice@example.com".to_string()),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.username, "alice");
        assert_eq!(user.telephone, "13800000000");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new(
            "alice".to_string(),
            "13800000000".to_string(),
            None,
            "$2b$04$hash".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut user = User::new(
            "alice".to_string(),
            "13800000000".to_string(),
            None,
            "old".to_string(),
        );

        user.set_password_hash("new".to_string());
        assert_eq!(user.password_hash, "new");
        assert!(user.updated_at >= user.created_at);
    }
}
