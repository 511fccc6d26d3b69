//! Endpoint tests over the in-memory collaborators.
//!
//! The same route configuration the binary mounts is exercised here against
//! the in-memory repository and code store, so these tests cover the full
//! deserialize -> orchestrate -> translate path without external services.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use signet_api::app::{configure, AppState};
use signet_core::domain::FieldValidator;
use signet_core::repositories::MemoryUserRepository;
use signet_core::services::auth::{AuthService, LoginDriver};
use signet_core::services::token::TokenService;
use signet_core::services::verification::{CodeStore, MemoryCodeStore};
use signet_infra::notify::{CodeNotifier, ConsoleSmsSender, SmtpMailer};
use signet_shared::config::{AuthConfig, DriverKind, SmtpConfig, TokenConfig, ValidationConfig};

type TestRepo = MemoryUserRepository;
type TestStore = MemoryCodeStore;
type TestGateway = CodeNotifier<ConsoleSmsSender>;
type TestDriver = LoginDriver<TestRepo>;
type TestState = AppState<TestRepo, TestStore, TestGateway, TestDriver>;

fn auth_config() -> AuthConfig {
    AuthConfig {
        token: TokenConfig {
            secret: "endpoint-test-secret".to_string(),
            expiry_seconds: 3600,
            algorithm: "HS256".to_string(),
        },
        driver: DriverKind::Token,
        bcrypt_cost: 4,
        redirect_allow_hosts: vec!["app.example.com".to_string()],
    }
}

fn build_state() -> (web::Data<TestState>, Arc<TestStore>) {
    let config = auth_config();
    let users = Arc::new(MemoryUserRepository::new(config.bcrypt_cost));
    let codes = Arc::new(MemoryCodeStore::new(Duration::from_secs(300)));
    let mailer = SmtpMailer::new(&SmtpConfig::default()).unwrap();
    let gateway = Arc::new(CodeNotifier::new(ConsoleSmsSender::new(), mailer));
    let tokens = TokenService::new(&config.token).unwrap();
    let driver = Arc::new(LoginDriver::from_config(config.driver, tokens, users.clone()));
    let validator = FieldValidator::new(&ValidationConfig::default()).unwrap();

    let auth = Arc::new(AuthService::new(
        users,
        codes.clone(),
        gateway,
        driver,
        validator,
        &config,
    ));
    (web::Data::new(AppState::new(auth)), codes)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(configure::<TestRepo, TestStore, TestGateway, TestDriver>),
        )
        .await
    };
}

fn register_body() -> Value {
    json!({
        "username": "alice",
        "telephone": "13800000000",
        "email": "alice@example.com",
        "password": "secret123"
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (state, _) = build_state();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_then_login() {
    let (state, _) = build_state();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["username"], "alice");
    assert!(created.get("password_hash").is_none());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "secret123" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = test::read_body_json(resp).await;
    assert!(session["token"].as_str().unwrap().contains('.'));
}

#[actix_web::test]
async fn test_register_with_invalid_username_reports_the_field() {
    let (state, _) = build_state();
    let app = test_app!(state);

    let mut body = register_body();
    body["username"] = json!("ab");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "VALIDATION_FAILED");
    assert!(error["details"]["username"].is_string());
}

#[actix_web::test]
async fn test_duplicate_registration_reports_taken_fields() {
    let (state, _) = build_state();
    let app = test_app!(state);

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(register_body())
                .to_request(),
        )
        .await;
        if resp.status() == StatusCode::CREATED {
            continue;
        }
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = test::read_body_json(resp).await;
        assert!(error["details"]["username"].is_string());
        return;
    }
    panic!("second registration unexpectedly succeeded");
}

#[actix_web::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (state, _) = build_state();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "CREDENTIAL_MISMATCH");
}

#[actix_web::test]
async fn test_login_redirect_to_allowed_host() {
    let (state, _) = build_state();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login?redirect_url=https://app.example.com/landing")
            .set_json(json!({ "account": "alice", "password": "secret123" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(location.starts_with("https://app.example.com/landing?token="));
}

#[actix_web::test]
async fn test_send_code_then_telephone_login() {
    let (state, codes) = build_state();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "channel": "sms", "identifier": "13800000000" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let code = codes.get("13800000000").await.unwrap().unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/telephone/login")
            .set_json(json!({ "telephone": "13800000000", "code": code }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = test::read_body_json(resp).await;
    assert!(session["token"].is_string());
}

#[actix_web::test]
async fn test_change_password_requires_authentication() {
    let (state, _) = build_state();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    // No credential material: rejected up front.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/change-password")
            .set_json(json!({ "raw_password": "secret123", "new_password": "fresh-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "MISSING_TOKEN");

    // Log in, then change the password with the issued token.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "secret123" }))
            .to_request(),
    )
    .await;
    let session: Value = test::read_body_json(resp).await;
    let token = session["token"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/change-password")
            .insert_header(("Authorization", format!("Token {token}")))
            .set_json(json!({ "raw_password": "secret123", "new_password": "fresh-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The old password no longer logs in; the new one does.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "secret123" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "fresh-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_password_with_stored_code() {
    let (state, codes) = build_state();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    codes.set("13800000000", "482913").await.unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/reset-password")
            .set_json(json!({
                "account": "alice",
                "verify_type": "telephone",
                "code": "482913",
                "new_password": "fresh-secret"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "account": "alice", "password": "fresh-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}
