//! Query debouncer
//!
//! Search boxes emit a value per keystroke; only the value that survives a
//! quiet period should reach the pager. Each submission waits out the delay
//! and resolves to `None` if a newer submission arrived in the meantime, so
//! the latest value wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Latest-value-wins debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    seq: Arc<AtomicU64>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a value; resolves to the value only if it was not superseded
    pub async fn debounce<T>(&self, value: T) -> Option<T> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.seq.load(Ordering::SeqCst) == ticket {
            Some(value)
        } else {
            None
        }
    }

    /// The configured quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
