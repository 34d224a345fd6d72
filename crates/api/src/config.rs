use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory for uploaded document blobs (default: `media`).
    pub media_root: String,
    /// Directory for the flat IP access log (default: `logs`).
    pub log_dir: String,
    /// Requests allowed per identifier per rate-limit window (default: `100`).
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in seconds (default: `60`).
    pub rate_limit_window_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `MEDIA_ROOT`              | `media`                 |
    /// | `LOG_DIR`                 | `logs`                  |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `100`                   |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `60`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into());
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".into());

        let rate_limit_max_requests: u32 = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("RATE_LIMIT_MAX_REQUESTS must be a valid u32");

        let rate_limit_window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            media_root,
            log_dir,
            rate_limit_max_requests,
            rate_limit_window_secs,
            jwt,
        }
    }
}
