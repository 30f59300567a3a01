//! Bounded TTL cache
//!
//! In-process cache with a fixed freshness window and a hard capacity. The
//! catalog data layer keys it by (query, page) so a repeated page request
//! within the window skips the network round-trip. Entries past the window
//! are treated as absent; when the cache is full the oldest entry by
//! insertion order is evicted.
//!
//! The cache is an explicit object handed to its consumers, so tests can
//! build one per case and drop it afterwards.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheInner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Keys in insertion order; the front is the eviction candidate.
    order: VecDeque<K>,
}

/// Bounded cache with per-entry freshness checking
///
/// Cloning is cheap and clones share the same underlying store.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    inner: Arc<Mutex<CacheInner<K, V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
            ttl: self.ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each fresh for `ttl`
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            })),
            capacity,
            ttl,
        }
    }

    /// Look up a key, returning the value only while it is still fresh
    ///
    /// A stale entry is removed and reported as a miss.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock().await;

        let fresh = match inner.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() < self.ttl,
            None => return None,
        };

        if fresh {
            return inner.entries.get(key).map(|e| e.value.clone());
        }

        inner.entries.remove(key);
        inner.order.retain(|k| k != key);
        None
    }

    /// Insert a value, evicting the oldest entry when over capacity
    ///
    /// Re-inserting an existing key refreshes its value and timestamp but
    /// keeps its original position in the eviction order.
    pub async fn insert(&self, key: K, value: V) {
        let mut inner = self.inner.lock().await;

        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if inner.entries.insert(key.clone(), entry).is_none() {
            inner.order.push_back(key);
        }

        while inner.entries.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Number of entries currently stored, stale ones included
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// True when the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every entry
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.order.clear();
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Freshness window applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
