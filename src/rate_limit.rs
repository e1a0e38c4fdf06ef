//! Fixed-window rate limiting for the admin login endpoint.
//!
//! A single shared password is a brute-force target, so failed attempts
//! are counted per client IP in a fixed window. State is in-process,
//! matching the single-node deployment model.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_WINDOW_SECS: i64 = 60;

struct Window {
    started_at: i64,
    attempts: u32,
}

pub struct LoginRateLimiter {
    max_attempts: u32,
    window_secs: i64,
    windows: Mutex<HashMap<String, Window>>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW_SECS)
    }
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window_secs: i64) -> Self {
        Self {
            max_attempts,
            window_secs,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `key`. Returns false once the window is full.
    pub fn check(&self, key: &str) -> bool {
        let now = Utc::now().timestamp();
        let mut windows = self.windows.lock().expect("rate limiter poisoned");

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            attempts: 0,
        });

        if now - window.started_at >= self.window_secs {
            window.started_at = now;
            window.attempts = 0;
        }

        window.attempts += 1;
        window.attempts <= self.max_attempts
    }

    /// Clear the window for `key`, e.g. after a successful login.
    pub fn reset(&self, key: &str) {
        self.windows
            .lock()
            .expect("rate limiter poisoned")
            .remove(key);
    }
}
