//! Account service for the Reelview platform
//!
//! Registration, login, stateless JWT sessions, and profile management over
//! a PostgreSQL user store. The binary in `main.rs` wires the service up;
//! the library surface exists so integration tests can build the router
//! in-process.

use sqlx::PgPool;

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod validation;

use crate::{jwt::JwtService, rate_limiter::LoginLimiter, repositories::UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub login_limiter: LoginLimiter,
}
