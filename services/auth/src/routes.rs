//! Account service routes

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    middleware::auth_middleware,
    models::{NewUser, UpdateProfile, UserResponse},
    repositories::is_unique_violation,
    validation::{validate_password, validate_profile_update, validate_registration},
};

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request for a password change
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Account statistics derived from the user record
#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(rename = "accountAge")]
    pub account_age: i64,
    #[serde(rename = "memberSince")]
    pub member_since: DateTime<Utc>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

/// Create the router for the account service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/verify", get(verify))
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/stats", get(get_stats))
        .route("/api/change-password", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "account-service"
    }))
}

/// Register a new account
///
/// No token is issued here; a fresh account logs in explicitly.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validate_registration(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(ApiError::Database)?
        .is_some()
    {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    match state.user_repository.create(&payload).await {
        Ok(user) => {
            info!("User {} registered", user.id);
            Ok((StatusCode::CREATED, Json(json!({ "message": "success" }))))
        }
        // lost the race against a concurrent registration for the same email
        Err(err) if is_unique_violation(&err) => {
            Err(ApiError::Conflict("User already exists".to_string()))
        }
        Err(err) => Err(ApiError::Database(err)),
    }
}

/// Log in with email and password
///
/// A missing account and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.login_limiter.check(&payload.email).await {
        return Err(ApiError::TooManyAttempts);
    }

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidCredentials);
    }

    let Some(user) = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(ApiError::Database)?
    else {
        state.login_limiter.record_failure(&payload.email).await;
        return Err(ApiError::InvalidCredentials);
    };

    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(ApiError::Database)?;

    if !password_ok {
        state.login_limiter.record_failure(&payload.email).await;
        return Err(ApiError::InvalidCredentials);
    }

    state.login_limiter.reset(&payload.email).await;

    let token = state.jwt_service.issue(&user).map_err(ApiError::Database)?;
    info!("User {} logged in", user.id);

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": UserResponse::from(&user),
    })))
}

/// Echo the user the middleware resolved from the bearer token
pub async fn verify(Extension(user): Extension<UserResponse>) -> impl IntoResponse {
    Json(json!({
        "message": "Token is valid",
        "user": user,
    }))
}

/// Fetch the current user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserResponse>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(user.id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": UserResponse::from(&user) })))
}

/// Update the current user's profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserResponse>,
    Json(payload): Json<UpdateProfile>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validate_profile_update(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let updated = state
        .user_repository
        .update_profile(user.id, &payload)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!("User {} updated profile", updated.id);
    Ok(Json(json!({ "user": UserResponse::from(&updated) })))
}

/// Account statistics for the current user
pub async fn get_stats(Extension(user): Extension<UserResponse>) -> impl IntoResponse {
    Json(json!({ "stats": stats_for(&user) }))
}

/// Change the current user's password
///
/// The current password must match before the new one is accepted.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<UserResponse>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = state
        .user_repository
        .find_by_id(user.id)
        .await
        .map_err(ApiError::Database)?
    else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    let current_ok = state
        .user_repository
        .verify_password(&user, &payload.current_password)
        .await
        .map_err(ApiError::Database)?;

    if !current_ok {
        return Err(ApiError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    if let Err(message) = validate_password(&payload.new_password) {
        return Err(ApiError::Validation(vec![message]));
    }

    state
        .user_repository
        .update_password(user.id, &payload.new_password)
        .await
        .map_err(ApiError::Database)?;

    info!("User {} changed password", user.id);
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

fn stats_for(user: &UserResponse) -> StatsResponse {
    StatsResponse {
        account_age: (Utc::now() - user.created_at).num_days(),
        member_since: user.created_at,
        last_updated: user.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn test_stats_report_whole_days_and_timestamps() {
        let created = Utc::now() - Duration::days(10) - Duration::hours(3);
        let updated = Utc::now() - Duration::hours(1);
        let user = UserResponse {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            age: 30,
            email: "ana@example.com".to_string(),
            created_at: created,
            updated_at: updated,
        };

        let stats = stats_for(&user);
        assert_eq!(stats.account_age, 10);
        assert_eq!(stats.member_since, created);
        assert_eq!(stats.last_updated, updated);

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("accountAge").is_some());
        assert!(json.get("memberSince").is_some());
        assert!(json.get("lastUpdated").is_some());
    }
}
