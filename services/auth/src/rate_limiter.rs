//! Login attempt limiter
//!
//! Sliding-window brute force protection for the login endpoint, keyed by
//! the submitted email. Failures inside the window accumulate; once the
//! limit is hit the key is banned for a fixed period. A successful login
//! clears the key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Limiter configuration
#[derive(Debug, Clone)]
pub struct LoginLimiterConfig {
    /// Failed attempts tolerated inside one window
    pub max_attempts: usize,
    /// Length of the sliding window
    pub window: Duration,
    /// How long a key stays banned after exceeding the limit
    pub ban_duration: Duration,
}

impl Default for LoginLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(300),        // 5 minutes
            ban_duration: Duration::from_secs(3600), // 1 hour
        }
    }
}

#[derive(Debug, Default)]
struct AttemptRecord {
    failures: Vec<Instant>,
    banned_until: Option<Instant>,
}

/// Login attempt limiter
#[derive(Debug, Clone)]
pub struct LoginLimiter {
    config: LoginLimiterConfig,
    records: Arc<Mutex<HashMap<String, AttemptRecord>>>,
}

impl LoginLimiter {
    /// Create a new limiter
    pub fn new(config: LoginLimiterConfig) -> Self {
        Self {
            config,
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether a login attempt for this key may proceed
    pub async fn check(&self, key: &str) -> bool {
        let mut records = self.records.lock().await;
        let now = Instant::now();

        let Some(record) = records.get_mut(key) else {
            return true;
        };

        if let Some(banned_until) = record.banned_until {
            if now < banned_until {
                return false;
            }
            record.banned_until = None;
            record.failures.clear();
        }

        let window = self.config.window;
        record.failures.retain(|at| now.duration_since(*at) < window);

        if record.failures.len() >= self.config.max_attempts {
            record.banned_until = Some(now + self.config.ban_duration);
            warn!(
                "Login key banned for {} seconds after repeated failures",
                self.config.ban_duration.as_secs()
            );
            return false;
        }

        true
    }

    /// Record one failed attempt for a key
    pub async fn record_failure(&self, key: &str) {
        let mut records = self.records.lock().await;
        records
            .entry(key.to_string())
            .or_default()
            .failures
            .push(Instant::now());
    }

    /// Clear a key after a successful login
    pub async fn reset(&self, key: &str) {
        let mut records = self.records.lock().await;
        records.remove(key);
    }

    /// The limiter configuration
    pub fn config(&self) -> &LoginLimiterConfig {
        &self.config
    }
}
