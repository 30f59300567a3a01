//! Error types for the catalog data layer

use thiserror::Error;

/// Errors surfaced by the catalog client and fetch controller
///
/// Upstream details stay inside the error; views render a generic failure
/// state instead of forwarding catalog internals to the end user.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration error (missing API key, bad base URL)
    #[error("Catalog configuration error: {0}")]
    Configuration(String),

    /// The request never produced a usable response
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("Catalog responded with status {status}")]
    Upstream { status: u16 },

    /// The response body did not match the expected shape
    #[error("Failed to decode catalog response: {0}")]
    Decode(#[source] reqwest::Error),
}
