//! MySQL implementation of the UserRepository trait.
//!
//! The `users` table carries unique indexes on `username`, `telephone`, and
//! `email`; those constraints are the authoritative duplicate guard. `create`
//! inserts without a pre-check and translates the constraint violation into
//! the domain conflict, which closes the read-then-write race under
//! concurrent registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::error;
use uuid::Uuid;

use signet_core::domain::entities::User;
use signet_core::domain::{password, FieldKind};
use signet_core::repositories::UserRepository;
use signet_core::{DomainError, DomainResult};

/// MySQL-backed user repository
pub struct MySqlUserRepository {
    pool: MySqlPool,
    bcrypt_cost: u32,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        let id: String = row.try_get("id").map_err(storage_error)?;
        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid user id in storage: {e}")))?,
            username: row.try_get("username").map_err(storage_error)?,
            telephone: row.try_get("telephone").map_err(storage_error)?,
            email: row.try_get("email").map_err(storage_error)?,
            password_hash: row.try_get("password_hash").map_err(storage_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(storage_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(storage_error)?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_account(&self, account: &str) -> DomainResult<Option<User>> {
        let query = r#"
            SELECT id, username, telephone, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE username = ? OR telephone = ? OR email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(account)
            .bind(account)
            .bind(account)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = r#"
            SELECT id, username, telephone, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        let query = r#"
            INSERT INTO users (
                id, username, telephone, email, password_hash,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.telephone)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let conflict = e
                    .as_database_error()
                    .filter(|db_err| db_err.is_unique_violation())
                    .map(|db_err| conflict_field(db_err.message()).to_string());
                match conflict {
                    Some(field) => DomainError::Conflict { field },
                    None => storage_error(e),
                }
            })?;

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
        // Column names come from the closed FieldKind set, never from input.
        let query = format!(
            "SELECT COUNT(*) AS cnt FROM users WHERE {} = ?",
            kind.as_str()
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let count: i64 = row.try_get("cnt").map_err(storage_error)?;
        Ok(count > 0)
    }

    async fn change_password(&self, user: &User, new_password: &str) -> DomainResult<()> {
        let hashed = password::hash(new_password, self.bcrypt_cost)?;

        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&hashed)
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

/// Map a duplicate-key message to the offending field name.
///
/// MySQL names the violated index in the message; the indexes are named
/// after their columns.
fn conflict_field(message: &str) -> &'static str {
    for kind in [FieldKind::Username, FieldKind::Telephone, FieldKind::Email] {
        if message.contains(kind.as_str()) {
            return kind.as_str();
        }
    }
    "account"
}

fn storage_error(e: sqlx::Error) -> DomainError {
    error!("database operation failed: {e}");
    DomainError::internal("credential storage unavailable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_field_extraction() {
        assert_eq!(
            conflict_field("Duplicate entry 'alice' for key 'users.uq_users_username'"),
            "username"
        );
        assert_eq!(
            conflict_field("Duplicate entry '138...' for key 'users.uq_users_telephone'"),
            "telephone"
        );
        assert_eq!(
            conflict_field("Duplicate entry 'a@b.c' for key 'users.uq_users_email'"),
            "email"
        );
        assert_eq!(conflict_field("Duplicate entry for key 'PRIMARY'"), "account");
    }
}
