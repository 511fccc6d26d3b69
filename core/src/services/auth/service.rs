//! The authentication orchestrator.
//!
//! Composes the credential repository, verification-code store, notification
//! gateway, and the active login driver into the user-facing flows. The
//! orchestrator owns none of the underlying state; every decision is
//! self-contained given the current repository and code store contents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use signet_shared::config::AuthConfig;

use crate::domain::entities::User;
use crate::domain::value_objects::{LoginOutcome, SessionPayload};
use crate::domain::{password, FieldKind, FieldValidator};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::verification::{code_for, Channel, CodeStore, NotificationGateway};

use super::context::AuthContext;
use super::driver::AuthDriver;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterParams {
    pub username: String,
    pub telephone: String,
    pub email: Option<String>,
    pub password: String,
}

/// Which channel value on the account a reset code is verified against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyKind {
    Email,
    Telephone,
}

/// Orchestrator for login, registration, and credential recovery
pub struct AuthService<R, C, G, D>
where
    R: UserRepository,
    C: CodeStore,
    G: NotificationGateway,
    D: AuthDriver,
{
    users: Arc<R>,
    codes: Arc<C>,
    gateway: Arc<G>,
    driver: Arc<D>,
    validator: FieldValidator,
    bcrypt_cost: u32,
    redirect_allow_hosts: Vec<String>,
}

impl<R, C, G, D> AuthService<R, C, G, D>
where
    R: UserRepository,
    C: CodeStore,
    G: NotificationGateway,
    D: AuthDriver,
{
    pub fn new(
        users: Arc<R>,
        codes: Arc<C>,
        gateway: Arc<G>,
        driver: Arc<D>,
        validator: FieldValidator,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            codes,
            gateway,
            driver,
            validator,
            bcrypt_cost: config.bcrypt_cost,
            redirect_allow_hosts: config.redirect_allow_hosts.clone(),
        }
    }

    /// Resolve the caller of the current request through the active driver
    pub async fn authenticate(&self, ctx: &AuthContext) -> DomainResult<User> {
        self.driver.current_user(ctx).await
    }

    /// Tear down the caller's session through the active driver
    pub async fn logout(&self, ctx: &AuthContext) -> DomainResult<()> {
        self.driver.logout(ctx).await
    }

    /// Password login.
    ///
    /// With a `redirect` target the session payload is flattened into the
    /// target's query string; the target host must be on the configured
    /// allow-list, otherwise the login is rejected before a session is
    /// issued.
    pub async fn login(
        &self,
        account: &str,
        password: &str,
        redirect: Option<&str>,
    ) -> DomainResult<LoginOutcome> {
        let user = self
            .users
            .check_credential(account, password)
            .await?
            .ok_or(DomainError::CredentialMismatch)?;

        // Redirect targets are checked before a session is minted.
        let target = match redirect.filter(|t| !t.is_empty()) {
            Some(target) => Some(self.checked_redirect_target(target)?),
            None => None,
        };

        let payload = self.driver.login(&user).await?;
        info!(username = %user.username, "login succeeded");

        match target {
            Some(mut url) => {
                {
                    let mut pairs = url.query_pairs_mut();
                    for (key, value) in payload.query_pairs() {
                        pairs.append_pair(key, value);
                    }
                }
                Ok(LoginOutcome::Redirect(url.to_string()))
            }
            None => Ok(LoginOutcome::Session(payload)),
        }
    }

    /// Telephone login: a stored verification code stands in for the
    /// password. The code is consumed on success.
    pub async fn telephone_login(&self, telephone: &str, code: &str) -> DomainResult<SessionPayload> {
        self.verify_and_consume_code(telephone, code).await?;

        let user = self
            .users
            .find_by_account(telephone)
            .await?
            .ok_or(DomainError::NotFound)?;

        let payload = self.driver.login(&user).await?;
        info!(username = %user.username, "telephone login succeeded");
        Ok(payload)
    }

    /// Registration.
    ///
    /// Format violations are collected across all fields, then uniqueness
    /// violations are added for the well-formed ones; nothing is created
    /// unless the map comes back empty. The unique constraints inside
    /// [`UserRepository::create`] remain the authoritative duplicate guard.
    pub async fn register(&self, params: RegisterParams) -> DomainResult<User> {
        let mut fields = BTreeMap::new();

        let username_ok = self.validator.is_valid(&params.username, FieldKind::Username);
        if !username_ok {
            fields.insert(
                "username".to_string(),
                "username must start with a letter and be at least 3 characters".to_string(),
            );
        }
        let telephone_ok = self
            .validator
            .is_valid(&params.telephone, FieldKind::Telephone);
        if !telephone_ok {
            fields.insert(
                "telephone".to_string(),
                "telephone number format is invalid".to_string(),
            );
        }
        let email_ok = match &params.email {
            Some(email) => {
                let ok = self.validator.is_valid(email, FieldKind::Email);
                if !ok {
                    fields.insert(
                        "email".to_string(),
                        "email address format is invalid".to_string(),
                    );
                }
                ok
            }
            None => false,
        };
        if params.password.len() < MIN_PASSWORD_LENGTH {
            fields.insert(
                "password".to_string(),
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        // Uniqueness probes only for fields that are well-formed.
        if username_ok && self.users.exists(&params.username, FieldKind::Username).await? {
            fields.insert("username".to_string(), "username is already taken".to_string());
        }
        if telephone_ok
            && self
                .users
                .exists(&params.telephone, FieldKind::Telephone)
                .await?
        {
            fields.insert(
                "telephone".to_string(),
                "telephone number is already registered".to_string(),
            );
        }
        if email_ok {
            let email = params.email.as_deref().unwrap_or_default();
            if self.users.exists(email, FieldKind::Email).await? {
                fields.insert(
                    "email".to_string(),
                    "email address is already registered".to_string(),
                );
            }
        }

        if !fields.is_empty() {
            return Err(DomainError::Validation { fields });
        }

        let hashed = password::hash(&params.password, self.bcrypt_cost)?;
        let user = User::new(params.username, params.telephone, params.email, hashed);
        let created = self.users.create(user).await?;
        info!(username = %created.username, "user registered");
        Ok(created)
    }

    /// Generate and dispatch a verification code over the given channel.
    ///
    /// The code is stored only after the gateway reports successful
    /// delivery; a delivery failure leaves no trace in the store.
    pub async fn send_code(&self, channel: Channel, identifier: &str) -> DomainResult<()> {
        let kind = match channel {
            Channel::Sms => FieldKind::Telephone,
            Channel::Email => FieldKind::Email,
        };
        if !self.validator.is_valid(identifier, kind) {
            return Err(DomainError::validation(
                kind.as_str(),
                format!("{} format is invalid", kind.as_str()),
            ));
        }

        let code = code_for(channel);
        self.gateway.deliver(channel, identifier, &code).await?;
        self.codes.set(identifier, &code).await?;

        info!(
            channel = ?channel,
            identifier = %mask(identifier),
            "verification code dispatched"
        );
        Ok(())
    }

    /// Reset a forgotten password with an out-of-band code.
    ///
    /// Verification and mutation happen within this one call; there is no
    /// persisted "verified" intermediate state carried across requests.
    pub async fn reset_password(
        &self,
        account: &str,
        verify_kind: VerifyKind,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "new_password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }

        let user = self
            .users
            .find_by_account(account)
            .await?
            .ok_or(DomainError::NotFound)?;

        let identifier = match verify_kind {
            VerifyKind::Telephone => user.telephone.clone(),
            VerifyKind::Email => user.email.clone().ok_or_else(|| {
                DomainError::validation("email", "account has no email address on record")
            })?,
        };

        self.verify_and_consume_code(&identifier, code).await?;
        self.users.change_password(&user, new_password).await?;
        info!(username = %user.username, "password reset");
        Ok(())
    }

    /// Change the password of an authenticated user.
    ///
    /// The current password is re-verified first; nothing is mutated on a
    /// mismatch.
    pub async fn change_password(
        &self,
        user: &User,
        raw_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(
                "new_password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }

        let verified = self
            .users
            .check_credential(&user.username, raw_password)
            .await?
            .ok_or(DomainError::CredentialMismatch)?;

        self.users.change_password(&verified, new_password).await?;
        info!(username = %verified.username, "password changed");
        Ok(())
    }

    /// Compare `code` against the stored entry and consume it on success.
    /// Codes are single-use: a matched code never verifies twice.
    async fn verify_and_consume_code(&self, identifier: &str, code: &str) -> DomainResult<()> {
        match self.codes.get(identifier).await? {
            Some(stored) if stored == code => {
                self.codes.remove(identifier).await?;
                Ok(())
            }
            _ => Err(DomainError::CredentialMismatch),
        }
    }

    fn checked_redirect_target(&self, target: &str) -> DomainResult<Url> {
        let url = Url::parse(target).map_err(|_| {
            DomainError::validation("redirect_url", "redirect target is not an absolute URL")
        })?;
        let host = url.host_str().ok_or_else(|| {
            DomainError::validation("redirect_url", "redirect target has no host")
        })?;
        if !self.redirect_allow_hosts.iter().any(|allowed| allowed == host) {
            warn!(host = %host, "rejected redirect to host outside the allow-list");
            return Err(DomainError::validation(
                "redirect_url",
                "redirect target is not allowed",
            ));
        }
        Ok(url)
    }
}

fn mask(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("***{tail}")
}
