//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use signet_shared::config::TokenConfig;

use crate::domain::entities::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Stateless codec for signed session tokens.
///
/// `issue` and `parse` are pure functions of the configured secret,
/// algorithm, and expiry; the service owns no mutable state and needs no
/// synchronization.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    expiry_seconds: i64,
}

impl TokenService {
    /// Creates a token service from the injected configuration.
    ///
    /// Only the symmetric HMAC family is supported; asymmetric algorithms
    /// need key material this configuration does not carry.
    pub fn new(config: &TokenConfig) -> DomainResult<Self> {
        let algorithm: Algorithm = config
            .algorithm
            .parse()
            .map_err(|_| DomainError::internal(format!("unknown algorithm {:?}", config.algorithm)))?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::internal(format!(
                "unsupported signing algorithm {:?}, expected an HMAC variant",
                config.algorithm
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            algorithm,
            expiry_seconds: config.expiry_seconds,
        })
    }

    /// Signs `{subject, issued-at, expiry}` into an opaque token
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, self.expiry_seconds);
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Generation)
    }

    /// Verifies a token and returns its claims.
    ///
    /// Expiry and forgery are distinguished so callers can offer a re-login
    /// instead of a flat rejection.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
