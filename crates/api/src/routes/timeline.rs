//! Route definitions for the read-only `/timeline` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::timeline;
use crate::state::AppState;

/// Routes mounted at `/timeline`.
///
/// ```text
/// GET / -> list (?project= required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(timeline::list))
}
