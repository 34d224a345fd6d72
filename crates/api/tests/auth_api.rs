//! HTTP-level integration tests for registration, login, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with a confirmation message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "new@test.com",
        "password": "strong_password_123!"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User registered successfully");
}

/// Registering an already-used email returns a 400 with a per-field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    common::create_test_user(&pool, "taken@test.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "taken@test.com",
        "password": "strong_password_123!"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["email"].is_array(),
        "duplicate email must surface as a field error, got: {json}"
    );
}

/// A body missing a required field gets a 400 field error, not a
/// deserialize rejection.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_missing_email_is_400_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "password": "strong_password_123!" });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["email"][0], "This field is required.");
}

/// A password under 8 characters is rejected with a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "shorty@test.com", "password": "seven77" });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["password"].is_array(), "got: {json}");
}

/// A malformed email address is rejected with a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "not-an-email", "password": "strong_password_123!" });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["email"].is_array(), "got: {json}");
}

/// An unknown role is rejected with a field error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_invalid_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "roley@test.com",
        "password": "strong_password_123!",
        "role": "superuser"
    });
    let response = post_json(app, "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["role"].is_array(), "got: {json}");
}

/// Registration without a role defaults to project_manager and can log in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_then_login_default_role(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": "defaulted@test.com",
        "password": "strong_password_123!"
    });
    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "defaulted@test.com",
        "password": "strong_password_123!"
    });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "project_manager");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with an access token and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = common::create_test_user(&pool, "login@test.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "login@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string(), "got: {json}");
    assert!(json["expires_in"].is_number(), "got: {json}");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@test.com");
    assert!(json["user"].get("password_hash").is_none(), "hash must never leak");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "wrongpw@test.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Invalid email or password");
}

/// Login with a nonexistent email returns the same 401 as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever1" });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Invalid email or password");
}

/// A deactivated account gets the same generic 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let user = common::create_test_user(&pool, "inactive@test.com").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "inactive@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logging out with a valid token returns 205 Reset Content.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_success(pool: PgPool) {
    let user = common::create_test_user(&pool, "logout@test.com").await;
    let token = common::token_for(&user);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": token });
    let response = post_json(app, "/api/users/logout", body).await;

    assert_eq!(response.status(), StatusCode::RESET_CONTENT);
}

/// Logging out the same token twice fails the second time with a generic 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_token_reuse(pool: PgPool) {
    let user = common::create_test_user(&pool, "reuse@test.com").await;
    let token = common::token_for(&user);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": token });
    let response = post_json(app, "/api/users/logout", body).await;
    assert_eq!(response.status(), StatusCode::RESET_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": token });
    let response = post_json(app, "/api/users/logout", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Token is invalid or expired");
}

/// Garbage and missing tokens both get the same generic 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/users/logout", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Token is invalid or expired");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/users/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Authentication enforcement
// ---------------------------------------------------------------------------

/// Protected endpoints reject requests without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Missing Authorization header");
}

/// A syntactically invalid bearer token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_rejects_bad_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/projects", "garbage-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Invalid or expired token");
}
