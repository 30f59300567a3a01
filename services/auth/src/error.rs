//! Error types for the account service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error type for account service handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input failed validation; field-level messages included
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Login failed; never reveals which of email/password was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, invalid, or expired credentials. Uniform on purpose: the
    /// response does not say which
    #[error("Unauthenticated")]
    Unauthorized,

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate resource (email already registered)
    #[error("{0}")]
    Conflict(String),

    /// Unknown user or resource
    #[error("{0}")]
    NotFound(String),

    /// Too many failed login attempts
    #[error("Too many attempts, please try again later")]
    TooManyAttempts,

    /// Anything unexpected; details are logged, never returned
    #[error("Server error")]
    Database(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Invalid email or password".to_string(),
                None,
            ),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthenticated".to_string(), None)
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            // duplicate emails go out as 400, like every other rejected register
            ApiError::Conflict(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            ApiError::TooManyAttempts => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many attempts, please try again later".to_string(),
                None,
            ),
            ApiError::Database(err) => {
                error!("Unhandled internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    None,
                )
            }
        };

        let body = match errors {
            Some(errors) => json!({ "message": message, "errors": errors }),
            None => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
