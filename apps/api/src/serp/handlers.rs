//! Axum route handlers for the SERP API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::keywords::service::validate_keyword;
use crate::models::serp::SerpLookup;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SerpRequest {
    pub keyword: String,
    pub location: Option<String>,
    pub language: Option<String>,
}

/// POST /api/v1/serp
///
/// Always answers. Provider failures are replaced with generated results;
/// `notice` is set when the user should wait or fix configuration.
pub async fn handle_lookup(
    State(state): State<AppState>,
    Json(request): Json<SerpRequest>,
) -> Result<Json<SerpLookup>, AppError> {
    let keyword = validate_keyword(&request.keyword)?;
    let lookup = state
        .serp
        .lookup(
            keyword,
            request.location.as_deref(),
            request.language.as_deref(),
        )
        .await;
    Ok(Json(lookup))
}

/// POST /api/v1/serp/live
///
/// Live results or an error: 429 when rate limited, 502 on credential or provider failure.
pub async fn handle_live(
    State(state): State<AppState>,
    Json(request): Json<SerpRequest>,
) -> Result<Json<SerpLookup>, AppError> {
    let keyword = validate_keyword(&request.keyword)?;
    let lookup = state
        .serp
        .fetch_live(
            keyword,
            request.location.as_deref(),
            request.language.as_deref(),
        )
        .await?;
    Ok(Json(lookup))
}
