//! Shared helpers for the API integration tests.
//!
//! Each test gets a fresh database from `#[sqlx::test]`; the app is built with
//! the production router so the full middleware stack is exercised.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use onlycard_api::auth::jwt::{generate_access_token, JwtConfig};
use onlycard_api::auth::password::hash_password;
use onlycard_api::config::ServerConfig;
use onlycard_api::router::build_app_router;
use onlycard_api::state::AppState;
use onlycard_core::card::CardDraft;
use onlycard_core::fields::FieldKey;
use onlycard_core::share::new_share_id;
use onlycard_core::theme::ThemeId;
use onlycard_core::types::DbId;
use onlycard_db::models::card::{Card, CardContent};
use onlycard_db::models::user::CreateUser;
use onlycard_db::repositories::{CardRepo, ProfileRepo, UserRepo};

pub const TEST_PASSWORD: &str = "secret123";
pub const PUBLIC_BASE_URL: &str = "http://localhost:3000";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Confirmation links are exposed so signup tests can follow them, and
/// uploads go to a fresh directory under the system temp dir.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: PUBLIC_BASE_URL.to_string(),
        upload_dir: upload_dir(),
        max_upload_bytes: 1024 * 1024,
        confirmation_expiry_hours: 24,
        expose_confirmation_links: true,
        jwt: test_jwt_config(),
    }
}

fn upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("onlycard-test-uploads-{}", uuid::Uuid::new_v4().simple()))
}

/// Build the full application router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a confirmed user with a profile and return `(user_id, access_token)`.
pub async fn create_confirmed_user(pool: &PgPool, email: &str) -> (DbId, String) {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    let user = UserRepo::create(pool, &input).await.expect("user creation should succeed");
    UserRepo::confirm_email(pool, user.id).await.unwrap();
    ProfileRepo::create_for_user(pool, user.id).await.unwrap();

    let token = generate_access_token(user.id, &test_jwt_config()).unwrap();
    (user.id, token)
}

/// A saveable draft: themed, with a name and a company.
pub fn card_draft(name: &str, theme: ThemeId) -> CardDraft {
    let mut draft = CardDraft::default();
    draft.theme = Some(theme);
    draft.fields.set(FieldKey::FullName, name.to_string());
    draft.fields.set(FieldKey::Company, "Acme".to_string());
    draft
}

/// Insert a card for `user_id` directly through the repository.
pub async fn create_card(pool: &PgPool, user_id: DbId, name: &str, theme: ThemeId) -> Card {
    let content = CardContent::from_draft(&card_draft(name, theme)).unwrap();
    CardRepo::create(pool, user_id, new_share_id(), &content)
        .await
        .expect("card creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

/// POST an `application/x-www-form-urlencoded` body, as a browser form does.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a single-file `multipart/form-data` body under the `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    bytes: &[u8],
) -> Response<Body> {
    let boundary = "onlycard-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = builder(Method::POST, uri, Some(token))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("response body should be UTF-8")
}
