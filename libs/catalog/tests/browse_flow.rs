//! Integration tests for the catalog data layer
//!
//! Drives the pager, scroll trigger, and response cache together the way a
//! browsing view does: search, scroll through pages, switch queries, and
//! come back within the freshness window.

use async_trait::async_trait;
use catalog::models::{MediaItem, MediaKind, PagedResponse};
use catalog::pager::PageKey;
use catalog::{CatalogError, FetchStatus, PageQuery, PageSource, Pager, ScrollTrigger};
use common::cache::TtlCache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ScriptedSource {
    pages: Mutex<HashMap<PageKey, PagedResponse>>,
    fetches: Arc<Mutex<Vec<PageKey>>>,
}

impl ScriptedSource {
    fn new(fetches: Arc<Mutex<Vec<PageKey>>>) -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            fetches,
        }
    }

    fn put(&self, query: PageQuery, page: u32, ids: &[u64], total_pages: u32) {
        let results = ids
            .iter()
            .map(|id| MediaItem {
                id: *id,
                media_type: Some(MediaKind::Movie),
                title: Some(format!("Movie {id}")),
                name: None,
                overview: None,
                poster_path: None,
                profile_path: None,
                backdrop_path: None,
                release_date: None,
                first_air_date: None,
                vote_average: 7.0,
                popularity: None,
            })
            .collect::<Vec<_>>();

        self.pages.lock().unwrap().insert(
            (query, page),
            PagedResponse {
                page,
                total_pages,
                total_results: results.len() as u64,
                results,
            },
        );
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(
        &self,
        query: &PageQuery,
        page: u32,
    ) -> Result<PagedResponse, CatalogError> {
        self.fetches.lock().unwrap().push((query.clone(), page));
        self.pages
            .lock()
            .unwrap()
            .get(&(query.clone(), page))
            .cloned()
            .ok_or(CatalogError::Upstream { status: 404 })
    }
}

async fn settle<S: PageSource>(pager: &Pager<S>) -> catalog::PagerSnapshot {
    for _ in 0..400 {
        let snapshot = pager.snapshot().await;
        if snapshot.status != FetchStatus::Loading {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("pager did not settle");
}

#[tokio::test]
async fn test_scroll_through_a_search_then_switch_queries() {
    let fetches = Arc::new(Mutex::new(Vec::new()));
    let source = ScriptedSource::new(Arc::clone(&fetches));

    let search = PageQuery::Search("bat".to_string());
    source.put(search.clone(), 1, &[1, 2, 3], 3);
    source.put(search.clone(), 2, &[3, 4], 3);
    source.put(search.clone(), 3, &[5], 3);
    let popular = PageQuery::Popular(MediaKind::Tv);
    source.put(popular.clone(), 1, &[9], 1);

    let cache = TtlCache::new(32, Duration::from_secs(300));
    let pager = Pager::new(source, cache);
    let trigger = ScrollTrigger::new(pager.clone());

    pager.set_query(search.clone()).await;
    let snapshot = settle(&pager).await;
    assert_eq!(snapshot.status, FetchStatus::Success);
    assert!(snapshot.has_more);

    // the sentinel comes into view twice; duplicate callbacks in between
    trigger.observe(true).await;
    trigger.observe(true).await;
    settle(&pager).await;
    trigger.observe(false).await;
    trigger.observe(true).await;
    let snapshot = settle(&pager).await;

    // pages 1-3 accumulated, the page-1/page-2 overlap deduplicated
    let ids: Vec<u64> = snapshot.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(!snapshot.has_more);

    // switching context resets accumulation
    pager.set_query(popular.clone()).await;
    let snapshot = settle(&pager).await;
    let ids: Vec<u64> = snapshot.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![9]);

    // returning within the freshness window is served from the cache
    let fetched_before = fetches.lock().unwrap().len();
    pager.set_query(search.clone()).await;
    let snapshot = settle(&pager).await;
    let ids: Vec<u64> = snapshot.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(fetches.lock().unwrap().len(), fetched_before);

    trigger.disconnect();
    pager.cancel().await;
}

#[tokio::test]
async fn test_upstream_failure_is_contained() {
    let fetches = Arc::new(Mutex::new(Vec::new()));
    let source = ScriptedSource::new(Arc::clone(&fetches));
    // nothing scripted: every fetch is an upstream failure

    let pager = Pager::new(source, TtlCache::new(8, Duration::from_secs(300)));
    pager.set_query(PageQuery::Search("down".to_string())).await;

    let snapshot = settle(&pager).await;
    assert_eq!(snapshot.status, FetchStatus::Error);
    assert!(snapshot.items.is_empty());
}
