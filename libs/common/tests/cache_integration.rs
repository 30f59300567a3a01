//! Integration tests for the shared TTL cache
//!
//! These tests exercise the cache the way the catalog data layer uses it:
//! shared between concurrent tasks, keyed by (query, page).

use common::cache::TtlCache;
use std::time::Duration;

#[tokio::test]
async fn test_cache_shared_across_tasks() {
    let cache: TtlCache<(String, u32), Vec<u64>> = TtlCache::new(16, Duration::from_secs(300));

    let mut handles = Vec::new();
    for page in 1..=8u32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache
                .insert(("batman".to_string(), page), vec![u64::from(page)])
                .await;
        }));
    }

    for handle in handles {
        handle.await.expect("writer task panicked");
    }

    assert_eq!(cache.len().await, 8);
    for page in 1..=8u32 {
        assert_eq!(
            cache.get(&("batman".to_string(), page)).await,
            Some(vec![u64::from(page)]),
        );
    }
}

#[tokio::test]
async fn test_cache_bounds_hold_under_interleaved_writes() {
    let cache: TtlCache<(String, u32), Vec<u64>> = TtlCache::new(4, Duration::from_secs(300));

    for page in 1..=10u32 {
        cache.insert(("popular".to_string(), page), vec![]).await;
    }

    assert_eq!(cache.len().await, cache.capacity());
    // the four most recent pages survive, the oldest six were evicted
    for page in 1..=6u32 {
        assert_eq!(cache.get(&("popular".to_string(), page)).await, None);
    }
    for page in 7..=10u32 {
        assert!(cache.get(&("popular".to_string(), page)).await.is_some());
    }
}
