use std::sync::Arc;

use taskhub_core::ratelimit::RateLimiter;

use crate::config::ServerConfig;
use crate::email::Mailer;
use crate::ip_log::IpLog;
use crate::storage::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskhub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Keyed request rate limiter, consulted by middleware on every request.
    pub rate_limiter: Arc<RateLimiter>,
    /// Append-only IP access log.
    pub ip_log: Arc<IpLog>,
    /// Uploaded-document storage under the media root.
    pub media: Arc<MediaStore>,
    /// Outbound SMTP mailer; `None` when SMTP is unconfigured.
    pub mailer: Option<Arc<Mailer>>,
}
