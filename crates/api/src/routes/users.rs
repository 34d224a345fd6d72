//! Route definitions for the `/users` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /register -> register
/// POST /login    -> login
/// POST /logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
}
