//! Route definitions for the read-only `/notifications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET / -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(notification::list))
}
