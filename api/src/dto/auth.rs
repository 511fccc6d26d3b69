//! Authentication request and response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use signet_core::domain::entities::User;
use signet_core::services::auth::{RegisterParams, VerifyKind};
use signet_core::services::verification::Channel;

/// Body for `POST /api/v1/auth/login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username, telephone, or email
    pub account: String,
    pub password: String,
}

/// Query for `POST /api/v1/auth/login`
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Optional redirect target; must be on the configured allow-list
    pub redirect_url: Option<String>,
}

/// Body for `POST /api/v1/auth/telephone/login`
#[derive(Debug, Deserialize)]
pub struct TelephoneLoginRequest {
    pub telephone: String,
    pub code: String,
}

/// Body for `POST /api/v1/auth/register`
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub telephone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

impl From<RegisterRequest> for RegisterParams {
    fn from(req: RegisterRequest) -> Self {
        RegisterParams {
            username: req.username,
            telephone: req.telephone,
            email: req.email,
            password: req.password,
        }
    }
}

/// Body for `POST /api/v1/auth/send-code`
#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub channel: Channel,
    pub identifier: String,
}

/// Body for `POST /api/v1/auth/reset-password`
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub account: String,
    pub verify_type: VerifyKind,
    pub code: String,
    pub new_password: String,
}

/// Body for `POST /api/v1/auth/change-password`
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub raw_password: String,
    pub new_password: String,
}

/// Public view of a user record
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub telephone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            telephone: user.telephone,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserializes_without_email() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","telephone":"13800000000","password":"secret123"}"#,
        )
        .unwrap();
        assert!(req.email.is_none());
    }

    #[test]
    fn test_send_code_channel_values() {
        let req: SendCodeRequest =
            serde_json::from_str(r#"{"channel":"sms","identifier":"13800000000"}"#).unwrap();
        assert_eq!(req.channel, Channel::Sms);

        let req: SendCodeRequest =
            serde_json::from_str(r#"{"channel":"email","identifier":"a@example.com"}"#).unwrap();
        assert_eq!(req.channel, Channel::Email);
    }

    #[test]
    fn test_verify_type_values() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"account":"alice","verify_type":"telephone","code":"482913","new_password":"fresh-secret"}"#,
        )
        .unwrap();
        assert_eq!(req.verify_type, VerifyKind::Telephone);
    }

    #[test]
    fn test_user_response_hides_absent_email() {
        let user = User::new(
            "alice".to_string(),
            "13800000000".to_string(),
            None,
            "hash".to_string(),
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
