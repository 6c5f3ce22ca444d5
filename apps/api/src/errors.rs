use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::serp::error::SerpError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("SERP provider authentication failed: {0}")]
    ProviderAuth(String),

    #[error("SERP provider error: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SerpError> for AppError {
    fn from(err: SerpError) -> Self {
        let notice = err.user_notice().map(str::to_string);
        match err {
            SerpError::RateLimited => {
                AppError::RateLimited(notice.unwrap_or_else(|| err.to_string()))
            }
            SerpError::Auth { .. } => {
                AppError::ProviderAuth(notice.unwrap_or_else(|| err.to_string()))
            }
            SerpError::NotConfigured => AppError::Validation(
                "No SERP provider is configured; live results are unavailable".to_string(),
            ),
            other => AppError::Provider(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::ProviderAuth(msg) => {
                tracing::error!("SERP provider auth error: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_AUTH_ERROR", msg.clone())
            }
            AppError::Provider(msg) => {
                tracing::warn!("SERP provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The search data provider could not be reached. Please retry.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
