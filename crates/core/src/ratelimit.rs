//! Fixed-window request rate limiting.
//!
//! [`RateLimiter`] is an explicit keyed counter store injected into the
//! request path via application state. The check and the increment happen
//! under a single lock, so concurrent requests from the same identifier
//! cannot both pass the limit check before either records itself.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default maximum requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request accepted; carries the request count within the current window.
    Allowed(u32),
    /// Request rejected; the window limit has been reached.
    Limited,
}

/// Per-identifier counter window.
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: Instant,
}

/// Keyed fixed-window rate limiter.
///
/// Identifiers are opaque strings (user id or client IP). Stale windows are
/// dropped lazily: on each check, and wholesale once the map grows past a
/// housekeeping threshold.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

/// Map size beyond which expired entries are swept on the next check.
const SWEEP_THRESHOLD: usize = 10_000;

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Check and count a request for `identifier` at the current instant.
    pub fn check(&self, identifier: &str) -> Decision {
        self.check_at(identifier, Instant::now())
    }

    /// Check and count a request at an explicit instant (testable clock).
    pub fn check_at(&self, identifier: &str, now: Instant) -> Decision {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started_at) <= window);
        }

        let entry = windows.entry(identifier.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });

        // Window elapsed: restart counting from this request.
        if now.duration_since(entry.started_at) > self.window {
            entry.count = 0;
            entry.started_at = now;
        }

        if entry.count >= self.max_requests {
            return Decision::Limited;
        }

        entry.count += 1;
        Decision::Allowed(entry.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();
        assert_eq!(limiter.check_at("k", now), Decision::Allowed(1));
        assert_eq!(limiter.check_at("k", now), Decision::Allowed(2));
        assert_eq!(limiter.check_at("k", now), Decision::Allowed(3));
        assert_eq!(limiter.check_at("k", now), Decision::Limited);
    }

    #[test]
    fn test_limit_is_per_identifier() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert_eq!(limiter.check_at("a", now), Decision::Allowed(1));
        assert_eq!(limiter.check_at("a", now), Decision::Limited);
        assert_eq!(limiter.check_at("b", now), Decision::Allowed(1));
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert_eq!(limiter.check_at("k", start), Decision::Allowed(1));
        assert_eq!(limiter.check_at("k", start), Decision::Allowed(2));
        assert_eq!(limiter.check_at("k", start), Decision::Limited);

        // First request of a fresh window is accepted regardless of prior counts.
        let later = start + Duration::from_secs(61);
        assert_eq!(limiter.check_at("k", later), Decision::Allowed(1));
    }

    #[test]
    fn test_hundred_and_first_request_is_limited() {
        let limiter = RateLimiter::default();
        let now = Instant::now();
        for i in 1..=100 {
            assert_eq!(limiter.check_at("user:1", now), Decision::Allowed(i));
        }
        assert_eq!(limiter.check_at("user:1", now), Decision::Limited);
    }

    #[test]
    fn test_concurrent_checks_never_exceed_limit() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(50, Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut allowed = 0u32;
                for _ in 0..25 {
                    if matches!(limiter.check("shared"), Decision::Allowed(_)) {
                        allowed += 1;
                    }
                }
                allowed
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50, "exactly the window limit must be admitted");
    }
}
