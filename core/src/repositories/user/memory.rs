//! In-memory implementation of UserRepository.
//!
//! Backs the test suite and the dev profile. Uniqueness is enforced under a
//! single write lock, giving the same authoritative-guard semantics as the
//! unique indexes in the MySQL implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::{password, FieldKind};
use crate::errors::{DomainError, DomainResult};

use super::repository::UserRepository;

/// In-memory user repository
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    bcrypt_cost: u32,
}

impl MemoryUserRepository {
    /// Create an empty repository with the given bcrypt cost
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
        }
    }

    fn matches_account(user: &User, account: &str) -> bool {
        user.username == account
            || user.telephone == account
            || user.email.as_deref() == Some(account)
    }

    fn field_value<'a>(user: &'a User, kind: FieldKind) -> Option<&'a str> {
        match kind {
            FieldKind::Username => Some(&user.username),
            FieldKind::Telephone => Some(&user.telephone),
            FieldKind::Email => user.email.as_deref(),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        // Minimum cost: this repository exists for tests and local runs.
        Self::new(4)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_account(&self, account: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| Self::matches_account(u, account))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;

        for kind in [FieldKind::Username, FieldKind::Telephone, FieldKind::Email] {
            if let Some(value) = Self::field_value(&user, kind) {
                if users
                    .values()
                    .any(|u| Self::field_value(u, kind) == Some(value))
                {
                    return Err(DomainError::Conflict {
                        field: kind.as_str().to_string(),
                    });
                }
            }
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn check_credential(&self, account: &str, password: &str) -> DomainResult<Option<User>> {
        let user = match self.find_by_account(account).await? {
            Some(user) => user,
            None => return Ok(None),
        };
        if password::verify(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn exists(&self, value: &str, kind: FieldKind) -> DomainResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| Self::field_value(u, kind) == Some(value)))
    }

    async fn change_password(&self, user: &User, new_password: &str) -> DomainResult<()> {
        let hashed = password::hash(new_password, self.bcrypt_cost)?;
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                stored.set_password_hash(hashed);
                Ok(())
            }
            None => Err(DomainError::NotFound),
        }
    }
}
