//! Axum route handlers for the Keyword and Query Fan-out APIs.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::keywords::expander::expand;
use crate::keywords::fanout::{fan_out, to_csv, FanOutQuery};
use crate::keywords::service::{validate_keyword, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
use crate::models::keyword::KeywordAnalysis;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub keyword: String,
    pub country: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub keyword: String,
    pub expansions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FanOutRequest {
    pub keyword: String,
    pub country: Option<String>,
    pub language: Option<String>,
    /// 1 – 12. Defaults to the current month.
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FanOutResponse {
    pub keyword: String,
    pub total: usize,
    pub queries: Vec<FanOutQuery>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<KeywordAnalysis>, AppError> {
    let analysis = state.keywords.analyze(
        &request.keyword,
        request.country.as_deref().unwrap_or(DEFAULT_COUNTRY),
        request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    )?;
    Ok(Json(analysis))
}

/// GET /api/v1/keywords
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<KeywordAnalysis>> {
    Json(state.keywords.recent())
}

/// GET /api/v1/keywords/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KeywordAnalysis>, AppError> {
    Ok(Json(state.keywords.get(id)?))
}

/// DELETE /api/v1/keywords/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KeywordAnalysis>, AppError> {
    Ok(Json(state.keywords.delete(id)?))
}

/// POST /api/v1/keywords/expand
pub async fn handle_expand(
    Json(request): Json<ExpandRequest>,
) -> Result<Json<ExpandResponse>, AppError> {
    let keyword = validate_keyword(&request.keyword)?;
    Ok(Json(ExpandResponse {
        keyword: keyword.to_string(),
        expansions: expand(keyword),
    }))
}

fn build_fan_out(state: &AppState, request: &FanOutRequest) -> Result<FanOutResponse, AppError> {
    let month = match request.month {
        Some(m @ 1..=12) => m,
        Some(other) => {
            return Err(AppError::Validation(format!(
                "month must be between 1 and 12, got {other}"
            )))
        }
        None => Utc::now().month(),
    };

    let analysis = state.keywords.analyze(
        &request.keyword,
        request.country.as_deref().unwrap_or(DEFAULT_COUNTRY),
        request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    )?;
    let queries = state.rng.with(|rng| fan_out(&analysis, month, rng));

    Ok(FanOutResponse {
        keyword: analysis.keyword,
        total: queries.len(),
        queries,
    })
}

/// POST /api/v1/queries/fanout
pub async fn handle_fan_out(
    State(state): State<AppState>,
    Json(request): Json<FanOutRequest>,
) -> Result<Json<FanOutResponse>, AppError> {
    Ok(Json(build_fan_out(&state, &request)?))
}

/// POST /api/v1/queries/fanout/export
///
/// Same query list as `/fanout`, as a downloadable CSV.
pub async fn handle_fan_out_export(
    State(state): State<AppState>,
    Json(request): Json<FanOutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = build_fan_out(&state, &request)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"query-fanout.csv\"",
            ),
        ],
        to_csv(&response.queries),
    ))
}
