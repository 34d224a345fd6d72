pub mod comment;
pub mod document;
pub mod health;
pub mod notification;
pub mod project;
pub mod task;
pub mod timeline;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register                 register (public)
/// /users/login                    login (public)
/// /users/logout                   logout (token in body)
///
/// /projects                       list, create
/// /projects/{id}                  get, put, patch, delete
///
/// /tasks                          list, create
/// /tasks/{id}                     get, put, patch, delete
/// /tasks/{id}/assign              assign (POST)
///
/// /documents                      list, create (multipart)
/// /documents/{id}                 get, put, patch, delete
/// /documents/{id}/download        download stored file (GET)
///
/// /comments                       list (?project, ?task), create
/// /comments/{id}                  get, put, patch, delete
///
/// /timeline                       list (?project=, required)
///
/// /notifications                  list (auth user's)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account routes (register, login, logout).
        .nest("/users", users::router())
        // Project CRUD.
        .nest("/projects", project::router())
        // Task CRUD and assignment.
        .nest("/tasks", task::router())
        // Document upload, metadata CRUD, and download.
        .nest("/documents", document::router())
        // Comments on projects and tasks.
        .nest("/comments", comment::router())
        // Read-only project timeline.
        .nest("/timeline", timeline::router())
        // Read-only per-user notifications.
        .nest("/notifications", notification::router())
}
