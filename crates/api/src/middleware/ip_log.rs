//! Request IP logging middleware.
//!
//! Appends one line per request to the flat access log before the request is
//! handled. Failures to write never fail the request.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

use super::client_ip;

/// Append `(ip, timestamp)` to the access log for every request.
pub async fn record(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);
    if let Err(e) = state.ip_log.append(&ip) {
        tracing::warn!(error = %e, "Failed to append to IP access log");
    }
    next.run(request).await
}
