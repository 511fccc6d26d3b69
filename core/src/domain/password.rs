//! Password hashing and verification.
//!
//! Passwords are stored only as bcrypt hashes; the cost factor is injected
//! through configuration. Verification failures and malformed stored hashes
//! both report a plain mismatch.

use crate::errors::{DomainError, DomainResult};

/// Hashes a plaintext password with the given bcrypt cost
pub fn hash(plain: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(plain, cost)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored bcrypt hash
pub fn verify(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}
