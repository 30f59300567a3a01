//! Paginated fetch controller
//!
//! Drives incremental loading of paged catalog results for one browsing
//! context: tracks the current page, accumulates deduplicated items, checks
//! the response cache before going to the network, and cancels an in-flight
//! request when a new query supersedes it. Results are applied under a
//! generation check, so a superseded request's late arrival can never touch
//! the state of the query that replaced it.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use common::cache::TtlCache;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::CatalogError;
use crate::models::{ItemKey, MediaItem, MediaKind, PagedResponse};

/// Cache key for one page of one query
pub type PageKey = (PageQuery, u32);

/// Browsing context a pager can load
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageQuery {
    /// Popular listing for one media kind
    Popular(MediaKind),
    /// Trending listing for one media kind
    Trending(MediaKind),
    /// Multi search by term
    Search(String),
}

impl PageQuery {
    /// Kind assigned to items that do not carry their own discriminator
    fn fallback_kind(&self) -> MediaKind {
        match self {
            PageQuery::Popular(kind) | PageQuery::Trending(kind) => *kind,
            PageQuery::Search(_) => MediaKind::Movie,
        }
    }
}

/// Source of result pages
///
/// Implemented by [`crate::CatalogClient`]; tests inject scripted sources.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    async fn fetch_page(
        &self,
        query: &PageQuery,
        page: u32,
    ) -> Result<PagedResponse, CatalogError>;
}

/// Loading status exposed to the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No query issued yet, or the pager was torn down
    Idle,
    Loading,
    Success,
    Error,
    /// The first page of a query came back empty; views route to not-found
    NoResults,
}

/// Point-in-time view of a pager for rendering
#[derive(Debug, Clone)]
pub struct PagerSnapshot {
    pub items: Vec<MediaItem>,
    pub status: FetchStatus,
    pub page: u32,
    pub has_more: bool,
}

struct PagerState {
    query: Option<PageQuery>,
    items: Vec<MediaItem>,
    seen: HashSet<ItemKey>,
    page: u32,
    has_more: bool,
    status: FetchStatus,
    /// Bumped on every query change; stale fetches fail this check
    generation: u64,
    inflight: Option<JoinHandle<()>>,
}

impl PagerState {
    fn new() -> Self {
        Self {
            query: None,
            items: Vec::new(),
            seen: HashSet::new(),
            page: 1,
            has_more: true,
            status: FetchStatus::Idle,
            generation: 0,
            inflight: None,
        }
    }

    fn abort_inflight(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

/// Paginated fetch controller for one browsing view
///
/// Cloning is cheap; clones share state, source, and cache.
pub struct Pager<S> {
    source: Arc<S>,
    cache: TtlCache<PageKey, PagedResponse>,
    state: Arc<Mutex<PagerState>>,
}

impl<S> Clone for Pager<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: self.cache.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: PageSource> Pager<S> {
    /// Create a pager over a page source and an injected response cache
    pub fn new(source: S, cache: TtlCache<PageKey, PagedResponse>) -> Self {
        Self {
            source: Arc::new(source),
            cache,
            state: Arc::new(Mutex::new(PagerState::new())),
        }
    }

    /// Switch to a new browsing context
    ///
    /// Cancels any in-flight request, clears the accumulated items, resets
    /// the page cursor, and starts loading page 1 of the new query.
    pub async fn set_query(&self, query: PageQuery) {
        let generation = {
            let mut state = self.state.lock().await;
            state.abort_inflight();
            state.generation += 1;
            state.query = Some(query.clone());
            state.items.clear();
            state.seen.clear();
            state.page = 1;
            state.has_more = true;
            state.status = FetchStatus::Loading;
            state.generation
        };

        self.fetch(query, 1, generation).await;
    }

    /// Load the next page of the current query
    ///
    /// Ignored while a fetch is in flight or when the listing is exhausted,
    /// so duplicate triggers collapse into one request.
    pub async fn load_more(&self) {
        let (query, page, generation) = {
            let mut state = self.state.lock().await;
            if state.status != FetchStatus::Success || !state.has_more {
                return;
            }
            let Some(query) = state.query.clone() else {
                return;
            };
            state.page += 1;
            state.status = FetchStatus::Loading;
            (query, state.page, state.generation)
        };

        self.fetch(query, page, generation).await;
    }

    /// Re-issue the fetch that last failed
    ///
    /// Failures are terminal per request; this is the explicit user action
    /// that starts a new one.
    pub async fn retry(&self) {
        let (query, page, generation) = {
            let mut state = self.state.lock().await;
            if state.status != FetchStatus::Error {
                return;
            }
            let Some(query) = state.query.clone() else {
                return;
            };
            state.status = FetchStatus::Loading;
            (query, state.page, state.generation)
        };

        self.fetch(query, page, generation).await;
    }

    /// Tear the pager down, cancelling any in-flight request
    ///
    /// The owning view calls this on unmount; a late completion of the
    /// cancelled fetch cannot mutate state afterwards.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        state.abort_inflight();
        state.generation += 1;
        state.query = None;
        state.items.clear();
        state.seen.clear();
        state.status = FetchStatus::Idle;
    }

    /// Current items, status, page, and has-more flag
    pub async fn snapshot(&self) -> PagerSnapshot {
        let state = self.state.lock().await;
        PagerSnapshot {
            items: state.items.clone(),
            status: state.status,
            page: state.page,
            has_more: state.has_more,
        }
    }

    async fn fetch(&self, query: PageQuery, page: u32, generation: u64) {
        // a fresh cached page satisfies the request without a round-trip
        if let Some(cached) = self.cache.get(&(query.clone(), page)).await {
            self.apply(generation, page, Ok(cached)).await;
            return;
        }

        let pager = self.clone();
        let handle = tokio::spawn(async move {
            let result = pager.source.fetch_page(&query, page).await;
            if let Ok(response) = &result {
                pager
                    .cache
                    .insert((query.clone(), page), response.clone())
                    .await;
            }
            pager.apply(generation, page, result).await;
        });

        let mut state = self.state.lock().await;
        if state.generation == generation {
            state.inflight = Some(handle);
        } else {
            // superseded between guard check and spawn
            handle.abort();
        }
    }

    async fn apply(
        &self,
        generation: u64,
        page: u32,
        result: Result<PagedResponse, CatalogError>,
    ) {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            // a newer query took over; this result is stale
            return;
        }
        state.inflight = None;

        match result {
            Ok(response) => {
                if page == 1 && response.results.is_empty() {
                    state.has_more = false;
                    state.status = FetchStatus::NoResults;
                    return;
                }

                let fallback = state
                    .query
                    .as_ref()
                    .map(PageQuery::fallback_kind)
                    .unwrap_or(MediaKind::Movie);

                let got_results = !response.results.is_empty();
                for item in response.results {
                    let key = item.key(fallback);
                    if state.seen.insert(key) {
                        state.items.push(item);
                    }
                }

                state.has_more = got_results && page < response.total_pages;
                state.status = FetchStatus::Success;
            }
            Err(err) => {
                warn!("Page fetch failed on page {}: {}", page, err);
                state.status = FetchStatus::Error;
            }
        }
    }
}
