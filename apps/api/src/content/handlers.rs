//! Axum route handlers for the Content API.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::content::export::ExportFormat;
use crate::errors::AppError;
use crate::models::content::{ContentDraft, ContentType, GeneratedContent, SeoReport};
use crate::models::keyword::KeywordStats;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub keyword: String,
    /// `service` | `blog` | `ecommerce`. Anything else falls back to `blog`.
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreContentRequest {
    pub content: ContentDraft,
    pub stats: KeywordStats,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/content/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    let content_type = request
        .content_type
        .as_deref()
        .map(ContentType::parse_or_default)
        .unwrap_or(ContentType::Blog);
    let content = state
        .content
        .generate(&request.keyword, content_type)
        .await?;
    Ok(Json(content))
}

/// POST /api/v1/content/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreContentRequest>,
) -> Result<Json<SeoReport>, AppError> {
    Ok(Json(
        state.content.score(&request.content, &request.stats).await?,
    ))
}

/// GET /api/v1/content
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<GeneratedContent>> {
    Json(state.content.list())
}

/// GET /api/v1/content/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedContent>, AppError> {
    Ok(Json(state.content.get(id)?))
}

/// DELETE /api/v1/content/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedContent>, AppError> {
    Ok(Json(state.content.delete(id)?))
}

/// GET /api/v1/content/:id/export?format=md|txt
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let file = state.content.export(id, format)?;
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, file.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    ))
}
