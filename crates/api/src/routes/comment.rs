//! Route definitions for the `/comments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /      -> list (?project=, ?task=)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// PATCH  /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comment::list).post(comment::create))
        .route(
            "/{id}",
            get(comment::get_by_id)
                .put(comment::update)
                .patch(comment::update)
                .delete(comment::delete),
        )
}
