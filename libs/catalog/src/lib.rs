//! Catalog data layer for the Reelview platform
//!
//! This crate is the client-side half of Reelview: a typed HTTP client for
//! the third-party catalog API plus the state machinery the browsing views
//! sit on top of. That covers incremental page fetching with deduplication,
//! response caching, cancellation of superseded requests, an infinite-scroll
//! trigger, and the advisory session gate that routes between authenticated
//! and anonymous views.

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod pager;
pub mod scroll;
pub mod session;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use pager::{FetchStatus, PageQuery, PageSource, Pager, PagerSnapshot};
pub use scroll::ScrollTrigger;
pub use session::{GateDecision, RouteKind, SessionGate, TokenStore};
