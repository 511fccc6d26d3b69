//! Application state and route configuration.

use actix_web::web;

use signet_core::repositories::UserRepository;
use signet_core::services::auth::{AuthDriver, AuthService};
use signet_core::services::verification::{CodeStore, NotificationGateway};
use std::sync::Arc;

use crate::routes;

/// Shared services injected into the route handlers
pub struct AppState<R, C, G, D>
where
    R: UserRepository,
    C: CodeStore,
    G: NotificationGateway,
    D: AuthDriver,
{
    pub auth: Arc<AuthService<R, C, G, D>>,
}

impl<R, C, G, D> AppState<R, C, G, D>
where
    R: UserRepository,
    C: CodeStore,
    G: NotificationGateway,
    D: AuthDriver,
{
    pub fn new(auth: Arc<AuthService<R, C, G, D>>) -> Self {
        Self { auth }
    }
}

/// Mount the service routes.
///
/// Generic over the collaborator types so the binary wires production
/// implementations while the endpoint tests wire the in-memory ones.
pub fn configure<R, C, G, D>(cfg: &mut web::ServiceConfig)
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(routes::auth::login::<R, C, G, D>))
            .route(
                "/telephone/login",
                web::post().to(routes::auth::telephone_login::<R, C, G, D>),
            )
            .route(
                "/register",
                web::post().to(routes::auth::register::<R, C, G, D>),
            )
            .route(
                "/send-code",
                web::post().to(routes::auth::send_code::<R, C, G, D>),
            )
            .route(
                "/reset-password",
                web::post().to(routes::auth::reset_password::<R, C, G, D>),
            )
            .route(
                "/change-password",
                web::post().to(routes::auth::change_password::<R, C, G, D>),
            )
            .route(
                "/logout",
                web::post().to(routes::auth::logout::<R, C, G, D>),
            ),
    )
    .route("/health", web::get().to(routes::health));
}
