//! User repository trait defining the interface for credential persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::FieldKind;
use crate::errors::DomainResult;

/// Repository contract for user records and credential checks.
///
/// Implementations own User persistence exclusively: uniqueness of username,
/// telephone, and email is enforced by the backing store, and password
/// material only ever crosses this boundary as plaintext to be hashed or
/// compared, never to be stored.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by account, where the account may be a username,
    /// telephone number, or email address.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - user found
    /// * `Ok(None)` - no user matches the account
    /// * `Err(DomainError)` - storage failure
    async fn find_by_account(&self, account: &str) -> DomainResult<Option<User>>;

    /// Find a user by unique identifier.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Persist a new user.
    ///
    /// The storage-level unique constraints on username, telephone, and
    /// email are the authoritative duplicate guard: a violation surfaces as
    /// `DomainError::Conflict` naming the offending field. Callers may probe
    /// with [`exists`](Self::exists) first for friendlier messages, but the
    /// constraint closes the read-then-write race under concurrent
    /// registration.
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Look up `account` and compare `password` against the stored hash.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - account exists and the password matches
    /// * `Ok(None)` - unknown account or hash mismatch; not an error, so
    ///   callers can tell "no session" from "system failure"
    /// * `Err(DomainError)` - storage failure
    async fn check_credential(&self, account: &str, password: &str) -> DomainResult<Option<User>>;

    /// Uniqueness probe for a single field value.
    async fn exists(&self, value: &str, kind: FieldKind) -> DomainResult<bool>;

    /// Re-hash `new_password` and persist it for `user`.
    async fn change_password(&self, user: &User, new_password: &str) -> DomainResult<()>;
}
