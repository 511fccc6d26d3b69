//! Signet API server binary.
//!
//! The dependency graph is assembled by hand, top-down: configuration, then
//! storage and delivery collaborators, then the token service and driver,
//! then the orchestrator handed to the HTTP layer.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use signet_api::app::{self, AppState};
use signet_core::domain::FieldValidator;
use signet_core::services::auth::{AuthService, LoginDriver};
use signet_core::services::token::TokenService;
use signet_infra::cache::{RedisClient, RedisCodeStore};
use signet_infra::database::create_pool;
use signet_infra::database::mysql::MySqlUserRepository;
use signet_infra::notify::{CodeNotifier, ConsoleSmsSender, SmtpMailer};
use signet_shared::config::Settings;

type Repo = MySqlUserRepository;
type Store = RedisCodeStore;
type Gateway = CodeNotifier<ConsoleSmsSender>;
type Driver = LoginDriver<Repo>;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env();
    if settings.auth.token.is_using_default_secret() {
        warn!("TOKEN_SECRET is unset; using the development secret");
    }

    let pool = create_pool(&settings.database).await.map_err(to_io)?;
    let redis = RedisClient::new(&settings.cache).await.map_err(to_io)?;

    let users = Arc::new(MySqlUserRepository::new(pool, settings.auth.bcrypt_cost));
    let codes = Arc::new(RedisCodeStore::new(redis, settings.cache.code_ttl_seconds));
    let mailer = SmtpMailer::new(&settings.smtp).map_err(to_io)?;
    let gateway = Arc::new(CodeNotifier::new(ConsoleSmsSender::new(), mailer));

    let tokens = TokenService::new(&settings.auth.token).map_err(to_io)?;
    let driver = Arc::new(LoginDriver::from_config(
        settings.auth.driver,
        tokens,
        users.clone(),
    ));
    let validator = FieldValidator::new(&settings.validation).map_err(to_io)?;

    let auth = Arc::new(AuthService::new(
        users,
        codes,
        gateway,
        driver,
        validator,
        &settings.auth,
    ));
    let state = web::Data::new(AppState::<Repo, Store, Gateway, Driver>::new(auth));

    let bind_address = settings.server.bind_address();
    info!(%bind_address, driver = ?settings.auth.driver, "starting Signet API server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(app::configure::<Repo, Store, Gateway, Driver>)
    })
    .bind(bind_address)?
    .run()
    .await
}

fn to_io(err: impl std::error::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}
