//! HTTP client for the catalog API
//!
//! Thin typed wrapper over the catalog's paged JSON endpoints. The catalog
//! is treated as rate-limited and occasionally slow; callers cancel by
//! dropping the in-flight future (see the pager), so no extra abort plumbing
//! is needed here.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::models::{
    MediaDetails, MediaKind, PagedResponse, PersonDetails, SeasonDetails, TimeWindow,
};
use crate::models::{Credits, Episode, ImageCollection, VideoList};
use crate::pager::{PageQuery, PageSource};

/// Client for the catalog API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog request to {} failed with status {}", path, status);
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(CatalogError::Decode)
    }

    /// Trending items for a media kind over a time window
    pub async fn trending(
        &self,
        kind: MediaKind,
        window: TimeWindow,
        page: u32,
    ) -> Result<PagedResponse, CatalogError> {
        let path = format!("/trending/{}/{}", kind.as_str(), window.as_str());
        self.get_json(&path, &[("page", page.to_string())]).await
    }

    /// Popular items for a media kind
    pub async fn popular(&self, kind: MediaKind, page: u32) -> Result<PagedResponse, CatalogError> {
        let path = format!("/{}/popular", kind.as_str());
        self.get_json(&path, &[("page", page.to_string())]).await
    }

    /// Multi search across movies, series, and people
    pub async fn search_multi(
        &self,
        query: &str,
        page: u32,
    ) -> Result<PagedResponse, CatalogError> {
        self.get_json(
            "/search/multi",
            &[
                ("query", query.trim().to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
        )
        .await
    }

    /// Movie/series detail with videos, credits, similar, recommendations,
    /// and images appended in one round-trip
    pub async fn media_details(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<MediaDetails, CatalogError> {
        let path = format!("/{}/{}", kind.as_str(), id);
        self.get_json(
            &path,
            &[(
                "append_to_response",
                "videos,credits,similar,recommendations,images".to_string(),
            )],
        )
        .await
    }

    /// Videos for a media item
    pub async fn videos(&self, kind: MediaKind, id: u64) -> Result<VideoList, CatalogError> {
        let path = format!("/{}/{}/videos", kind.as_str(), id);
        self.get_json(&path, &[]).await
    }

    /// Images for a media item
    pub async fn images(&self, kind: MediaKind, id: u64) -> Result<ImageCollection, CatalogError> {
        let path = format!("/{}/{}/images", kind.as_str(), id);
        self.get_json(&path, &[]).await
    }

    /// Credits for a media item
    pub async fn credits(&self, kind: MediaKind, id: u64) -> Result<Credits, CatalogError> {
        let path = format!("/{}/{}/credits", kind.as_str(), id);
        self.get_json(&path, &[]).await
    }

    /// Items similar to a media item
    pub async fn similar(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<PagedResponse, CatalogError> {
        let path = format!("/{}/{}/similar", kind.as_str(), id);
        self.get_json(&path, &[("page", page.to_string())]).await
    }

    /// Recommendations for a media item
    pub async fn recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        page: u32,
    ) -> Result<PagedResponse, CatalogError> {
        let path = format!("/{}/{}/recommendations", kind.as_str(), id);
        self.get_json(&path, &[("page", page.to_string())]).await
    }

    /// Person detail with combined credits and images appended
    pub async fn person_details(&self, id: u64) -> Result<PersonDetails, CatalogError> {
        let path = format!("/person/{}", id);
        self.get_json(
            &path,
            &[(
                "append_to_response",
                "movie_credits,tv_credits,images".to_string(),
            )],
        )
        .await
    }

    /// Season detail for a series
    pub async fn season_details(
        &self,
        series_id: u64,
        season_number: u32,
    ) -> Result<SeasonDetails, CatalogError> {
        let path = format!("/tv/{}/season/{}", series_id, season_number);
        self.get_json(&path, &[]).await
    }

    /// Episode detail for a series
    pub async fn episode_details(
        &self,
        series_id: u64,
        season_number: u32,
        episode_number: u32,
    ) -> Result<Episode, CatalogError> {
        let path = format!(
            "/tv/{}/season/{}/episode/{}",
            series_id, season_number, episode_number
        );
        self.get_json(&path, &[]).await
    }
}

#[async_trait]
impl PageSource for CatalogClient {
    async fn fetch_page(&self, query: &PageQuery, page: u32) -> Result<PagedResponse, CatalogError> {
        match query {
            PageQuery::Popular(kind) => self.popular(*kind, page).await,
            PageQuery::Trending(kind) => self.trending(*kind, TimeWindow::Day, page).await,
            PageQuery::Search(term) => self.search_multi(term, page).await,
        }
    }
}
