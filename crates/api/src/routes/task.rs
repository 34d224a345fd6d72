//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// PATCH  /{id}         -> update
/// DELETE /{id}         -> delete
/// POST   /{id}/assign  -> assign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id)
                .put(task::update)
                .patch(task::update)
                .delete(task::delete),
        )
        .route("/{id}/assign", post(task::assign))
}
