//! Handlers for the `/users` resource (register, login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskhub_core::error::CoreError;
use taskhub_core::roles::{is_valid_role, ROLE_PROJECT_MANAGER};
use taskhub_db::models::user::{CreateUser, UserResponse};
use taskhub_db::repositories::{RevokedTokenRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, hash_token, validate_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::Json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/users/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    /// Defaults to `project_manager` when omitted.
    pub role: Option<String>,
}

/// Request body for `POST /api/users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/users/logout`.
///
/// The token field is optional at the serde level so a missing field maps to
/// the same generic 400 as an invalid token rather than a deserialize error.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/register
///
/// Create an account. Returns 201 with a confirmation message; validation
/// failures come back as a per-field dictionary.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    input.validate()?;

    let role = match input.role {
        Some(role) => {
            if !is_valid_role(&role) {
                return Err(AppError::Field {
                    field: "role".to_string(),
                    message: format!("\"{role}\" is not a valid choice."),
                });
            }
            role
        }
        None => ROLE_PROJECT_MANAGER.to_string(),
    };

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: input.email,
        password_hash,
        role,
    };
    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "uq_users_email") {
                AppError::Field {
                    field: "email".to_string(),
                    message: "user with this email already exists.".to_string(),
                }
            } else {
                AppError::Database(e)
            }
        })?;

    // Welcome email is best-effort and must not delay the response.
    if let Some(mailer) = state.mailer.clone() {
        let email = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&email).await {
                tracing::warn!(error = %e, to = email, "Failed to send welcome email");
            }
        });
    }

    tracing::info!(user_id = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /api/users/login
///
/// Authenticate with email + password. Returns an access token. Unknown
/// email, wrong password, and deactivated accounts all produce the same
/// 401 so the response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(invalid());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// POST /api/users/logout
///
/// Blacklist the submitted token's hash. Returns 205 Reset Content on
/// success; a missing, malformed, expired, or already-revoked token gets the
/// same generic 400 so the endpoint leaks nothing about token state.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<LogoutRequest>,
) -> AppResult<StatusCode> {
    let invalid = || AppError::BadRequest("Token is invalid or expired".into());

    let token = input.refresh_token.ok_or_else(invalid)?;
    let claims = validate_token(&token, &state.config.jwt).map_err(|_| invalid())?;

    let token_hash = hash_token(&token);
    let newly_revoked = RevokedTokenRepo::revoke(&state.pool, &token_hash, &claims.jti).await?;
    if !newly_revoked {
        return Err(invalid());
    }

    tracing::info!(user_id = claims.sub, "User logged out");
    Ok(StatusCode::RESET_CONTENT)
}
