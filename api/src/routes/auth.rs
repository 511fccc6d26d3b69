//! Authentication endpoints.
//!
//! Handlers are thin bindings: deserialize, call the orchestrator, translate
//! the outcome. The authenticated identity is resolved through an explicit
//! per-request [`AuthContext`] and threaded into the orchestrator as an
//! argument.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use signet_core::domain::value_objects::LoginOutcome;
use signet_core::repositories::UserRepository;
use signet_core::services::auth::{AuthContext, AuthDriver};
use signet_core::services::verification::{CodeStore, NotificationGateway};

use crate::app::AppState;
use crate::dto::auth::{
    ChangePasswordRequest, LoginQuery, LoginRequest, RegisterRequest, ResetPasswordRequest,
    SendCodeRequest, TelephoneLoginRequest, UserResponse,
};
use crate::dto::ApiError;

/// Build the request-scoped authentication context from the raw header
fn auth_context(req: &HttpRequest) -> AuthContext {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    AuthContext::new(authorization)
}

/// `POST /api/v1/auth/login`
pub async fn login<R, C, G, D>(
    state: web::Data<AppState<R, C, G, D>>,
    query: web::Query<LoginQuery>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    let outcome = state
        .auth
        .login(&body.account, &body.password, query.redirect_url.as_deref())
        .await?;

    Ok(match outcome {
        LoginOutcome::Session(payload) => HttpResponse::Ok().json(payload),
        LoginOutcome::Redirect(url) => HttpResponse::Found()
            .insert_header((header::LOCATION, url))
            .finish(),
    })
}

/// `POST /api/v1/auth/telephone/login`
pub async fn telephone_login<R, C, G, D>(
    state: web::Data<AppState<R, C, G, D>>,
    body: web::Json<TelephoneLoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    let payload = state
        .auth
        .telephone_login(&body.telephone, &body.code)
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// `POST /api/v1/auth/register`
pub async fn register<R, C, G, D>(
    state: web::Data<AppState<R, C, G, D>>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    let created = state.auth.register(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// `POST /api/v1/auth/send-code`
pub async fn send_code<R, C, G, D>(
    state: web::Data<AppState<R, C, G, D>>,
    body: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    state.auth.send_code(body.channel, &body.identifier).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// `POST /api/v1/auth/reset-password`
pub async fn reset_password<R, C, G, D>(
    state: web::Data<AppState<R, C, G, D>>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    state
        .auth
        .reset_password(
            &body.account,
            body.verify_type,
            &body.code,
            &body.new_password,
        )
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// `POST /api/v1/auth/change-password`
pub async fn change_password<R, C, G, D>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, G, D>>,
    body: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    let ctx = auth_context(&req);
    let user = state.auth.authenticate(&ctx).await?;
    state
        .auth
        .change_password(&user, &body.raw_password, &body.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// `POST /api/v1/auth/logout`
pub async fn logout<R, C, G, D>(
    req: HttpRequest,
    state: web::Data<AppState<R, C, G, D>>,
) -> Result<HttpResponse, ApiError>
where
    R: UserRepository + 'static,
    C: CodeStore + 'static,
    G: NotificationGateway + 'static,
    D: AuthDriver + 'static,
{
    let ctx = auth_context(&req);
    state.auth.logout(&ctx).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}
