//! Translation of domain errors into HTTP responses.
//!
//! Recognized taxonomy members map to stable error codes and status codes;
//! internal failures were already logged at their origin and cross the wire
//! without detail.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use signet_core::{DomainError, TokenError};
use signet_shared::types::response::ErrorResponse;

/// Wrapper carrying a domain error through an actix handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match &self.0 {
            DomainError::Validation { .. } => "VALIDATION_FAILED",
            DomainError::CredentialMismatch => "CREDENTIAL_MISMATCH",
            DomainError::MissingToken => "MISSING_TOKEN",
            DomainError::Token(TokenError::Expired) => "EXPIRED_TOKEN",
            DomainError::Token(_) => "INVALID_TOKEN",
            DomainError::NotFound => "NOT_FOUND",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::Gateway { .. } => "GATEWAY_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::CredentialMismatch
            | DomainError::MissingToken
            | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ErrorResponse::new(self.code(), self.0.to_string());

        match &self.0 {
            DomainError::Validation { fields } => {
                for (field, message) in fields {
                    body = body.with_detail(field, serde_json::json!(message));
                }
            }
            DomainError::Conflict { field } => {
                body = body.with_detail("field", serde_json::json!(field));
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
