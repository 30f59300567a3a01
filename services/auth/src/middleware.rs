//! Authentication middleware
//!
//! Pure gate in front of the protected routes: extract the bearer token,
//! verify it, load the user it points at, and attach the password-free view
//! of that user to the request. Every failure mode (missing header, bad or
//! expired token, deleted account) rejects with the same 401.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::ApiError, models::UserResponse};

/// Validate the bearer token and attach the current user to the request
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt_service
        .verify(token)
        .map_err(|_| ApiError::Unauthorized)?;

    // a valid token for a deleted account gets the same rejection
    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await
        .map_err(ApiError::Database)?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(UserResponse::from(&user));

    Ok(next.run(req).await)
}
