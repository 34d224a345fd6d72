//! Per-identifier request rate limiting.
//!
//! Applied to the whole router. The identifier is the authenticated user's
//! id when the request carries a valid bearer token, otherwise the client
//! IP, so unauthenticated endpoints (login, register) are covered too.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use taskhub_core::ratelimit::Decision;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

use super::client_ip;

/// Reject requests whose identifier has exhausted its window budget.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let identifier = identify(&state, &request);

    match state.rate_limiter.check(&identifier) {
        Decision::Allowed(_) => next.run(request).await,
        Decision::Limited => {
            tracing::warn!(%identifier, "Rate limit exceeded");
            AppError::RateLimited.into_response()
        }
    }
}

/// Identifier for rate accounting: user id when authenticated, else IP.
fn identify(state: &AppState, request: &Request) -> String {
    let bearer = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        if let Ok(claims) = validate_token(token, &state.config.jwt) {
            return format!("user:{}", claims.sub);
        }
    }

    format!("ip:{}", client_ip(request))
}
