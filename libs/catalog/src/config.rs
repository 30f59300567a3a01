//! Catalog client configuration

use crate::error::CatalogError;
use std::env;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Configuration for the catalog API client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL of the catalog API
    pub base_url: String,
}

impl CatalogConfig {
    /// Create a new CatalogConfig from environment variables
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY`: API key for the catalog API (required)
    /// - `TMDB_BASE_URL`: Base URL (default: "https://api.themoviedb.org/3")
    pub fn from_env() -> Result<Self, CatalogError> {
        let api_key = env::var("TMDB_API_KEY").map_err(|_| {
            CatalogError::Configuration("TMDB_API_KEY environment variable not set".to_string())
        })?;

        let base_url =
            env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    /// Build a config directly, bypassing the environment
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}
