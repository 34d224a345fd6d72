pub mod auth;
pub mod ip_log;
pub mod rate_limit;

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;

/// Best-effort client IP for a request.
///
/// Prefers the first entry of `X-Forwarded-For` (proxy deployments), then the
/// peer address recorded by the connect-info extension. Falls back to
/// `"unknown"` -- e.g. in tests that drive the router without a socket.
pub fn client_ip<B>(request: &Request<B>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
