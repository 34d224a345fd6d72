//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of a per-test database pool, with file storage and the IP log pointed at
//! throwaway temp directories.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskhub_api::auth::jwt::{generate_access_token, JwtConfig};
use taskhub_api::auth::password::hash_password;
use taskhub_api::config::ServerConfig;
use taskhub_api::ip_log::IpLog;
use taskhub_api::router::build_app_router;
use taskhub_api::state::AppState;
use taskhub_api::storage::MediaStore;
use taskhub_core::ratelimit::RateLimiter;
use taskhub_db::models::user::{CreateUser, User};
use taskhub_db::repositories::UserRepo;

/// Signing secret shared by the test app and token helpers.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-not-for-production";

/// Password used for every user created through [`create_test_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: "unused".to_string(),
        log_dir: "unused".to_string(),
        rate_limit_max_requests: 1000,
        rate_limit_window_secs: 60,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a generous rate limit.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_limit(pool, 1000)
}

/// Like [`build_test_app`] but with an explicit per-window request limit,
/// for exercising 429 behaviour.
pub fn build_test_app_with_limit(pool: PgPool, max_requests: u32) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter: Arc::new(RateLimiter::new(max_requests, Duration::from_secs(60))),
        ip_log: Arc::new(IpLog::open(scratch_dir()).expect("ip log should open")),
        media: Arc::new(MediaStore::open(scratch_dir()).expect("media store should open")),
        mailer: None,
    };

    build_app_router(state, &config)
}

/// A fresh temp directory that outlives the test process's needs.
fn scratch_dir() -> std::path::PathBuf {
    let dir = tempfile::tempdir().expect("tempdir should be creatable");
    let path = dir.path().to_path_buf();
    // Dropped at process exit by the OS temp cleaner; the handle must not
    // delete it while the app still writes there.
    std::mem::forget(dir);
    path
}

// ---------------------------------------------------------------------------
// User and token helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, email: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
        role: "project_manager".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Generate an access token for `user` signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.email, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn with_bearer(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

async fn json_request(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = with_bearer(builder, token)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_bearer(Request::builder().method("GET").uri(uri), Some(token))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, "POST", uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "POST", uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "PUT", uri, body, Some(token)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "PATCH", uri, body, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_bearer(Request::builder().method("DELETE").uri(uri), Some(token))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Send a multipart POST with the given parts. `file` parts carry a filename
/// and raw bytes; other parts are plain text fields.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, MultipartPart<'_>)],
    token: &str,
) -> Response<Body> {
    const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

    let mut body = Vec::new();
    for (name, part) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            MultipartPart::Text(value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File { filename, data } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    let request = with_bearer(builder, Some(token))
        .body(Body::from(body))
        .expect("request should build");
    send(app, request).await
}

/// A single part of a multipart request body.
pub enum MultipartPart<'a> {
    Text(&'a str),
    File { filename: &'a str, data: &'a [u8] },
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}
