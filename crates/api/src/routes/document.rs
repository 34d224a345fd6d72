//! Route definitions for the `/documents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (multipart)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/download   -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(document::list).post(document::create))
        .route(
            "/{id}",
            get(document::get_by_id)
                .put(document::update)
                .patch(document::update)
                .delete(document::delete),
        )
        .route("/{id}/download", get(document::download))
}
