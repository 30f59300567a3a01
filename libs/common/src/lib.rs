//! Common library for the Reelview platform
//!
//! This crate provides shared infrastructure used across the Reelview
//! workspace: PostgreSQL connectivity for the account service, the bounded
//! TTL response cache used by the catalog data layer, and shared error
//! types.

pub mod cache;
pub mod database;
pub mod error;
