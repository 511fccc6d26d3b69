//! Pluggable login drivers.
//!
//! A driver turns a verified user into a session artifact and recovers the
//! authenticated identity from a request. [`LoginDriver`] enumerates the
//! available variants; the active one is chosen once at startup from
//! configuration, never by runtime type inspection.

use async_trait::async_trait;
use std::sync::Arc;

use signet_shared::config::DriverKind;

use crate::domain::entities::User;
use crate::domain::value_objects::SessionPayload;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::context::AuthContext;

/// Strategy implementing login/logout/session-check for one authentication
/// mechanism.
///
/// Per request the state machine is `Unauthenticated -> Authenticated` or
/// `Unauthenticated -> Failed`, both terminal; a failure is always an
/// explicit `Err`, never a panic.
#[async_trait]
pub trait AuthDriver: Send + Sync {
    /// Validate the request's credential material and resolve the caller.
    ///
    /// The resolved identity is cached on the context so the work happens at
    /// most once per request.
    async fn check(&self, ctx: &AuthContext) -> DomainResult<User>;

    /// The authenticated caller: the cached identity when `check` already
    /// ran this request, otherwise the result of running it now.
    async fn current_user(&self, ctx: &AuthContext) -> DomainResult<User>;

    /// Produce the session artifact for a freshly verified user
    async fn login(&self, user: &User) -> DomainResult<SessionPayload>;

    /// Tear down session state, where the mechanism has any
    async fn logout(&self, ctx: &AuthContext) -> DomainResult<()>;
}

/// Stateless signed-token driver
pub struct TokenDriver<R: UserRepository> {
    tokens: TokenService,
    users: Arc<R>,
}

impl<R: UserRepository> TokenDriver<R> {
    pub fn new(tokens: TokenService, users: Arc<R>) -> Self {
        Self { tokens, users }
    }

    async fn resolve(&self, ctx: &AuthContext) -> DomainResult<User> {
        let raw = ctx.token()?;
        let claims = self.tokens.parse(raw)?;
        // The token outlives the account check: a deleted subject must not
        // keep a valid-looking session.
        self.users
            .find_by_account(&claims.sub)
            .await?
            .ok_or(DomainError::NotFound)
    }
}

#[async_trait]
impl<R: UserRepository> AuthDriver for TokenDriver<R> {
    async fn check(&self, ctx: &AuthContext) -> DomainResult<User> {
        let user = ctx.user.get_or_try_init(|| self.resolve(ctx)).await?;
        Ok(user.clone())
    }

    async fn current_user(&self, ctx: &AuthContext) -> DomainResult<User> {
        self.check(ctx).await
    }

    async fn login(&self, user: &User) -> DomainResult<SessionPayload> {
        let token = self.tokens.issue(&user.username)?;
        Ok(SessionPayload::new(token))
    }

    async fn logout(&self, _ctx: &AuthContext) -> DomainResult<()> {
        // Stateless tokens hold no server-side session to invalidate. A
        // stateful driver variant would revoke its session record here.
        Ok(())
    }
}

/// The enumerated driver variants
pub enum LoginDriver<R: UserRepository> {
    Token(TokenDriver<R>),
}

impl<R: UserRepository> LoginDriver<R> {
    /// Build the configured variant once at startup
    pub fn from_config(kind: DriverKind, tokens: TokenService, users: Arc<R>) -> Self {
        match kind {
            DriverKind::Token => LoginDriver::Token(TokenDriver::new(tokens, users)),
        }
    }
}

#[async_trait]
impl<R: UserRepository> AuthDriver for LoginDriver<R> {
    async fn check(&self, ctx: &AuthContext) -> DomainResult<User> {
        match self {
            LoginDriver::Token(driver) => driver.check(ctx).await,
        }
    }

    async fn current_user(&self, ctx: &AuthContext) -> DomainResult<User> {
        match self {
            LoginDriver::Token(driver) => driver.current_user(ctx).await,
        }
    }

    async fn login(&self, user: &User) -> DomainResult<SessionPayload> {
        match self {
            LoginDriver::Token(driver) => driver.login(user).await,
        }
    }

    async fn logout(&self, ctx: &AuthContext) -> DomainResult<()> {
        match self {
            LoginDriver::Token(driver) => driver.logout(ctx).await,
        }
    }
}
