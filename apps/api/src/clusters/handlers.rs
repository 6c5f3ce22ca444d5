//! Axum route handlers for the Topic Cluster API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cluster::TopicCluster;
use crate::models::keyword::Intent;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateClusterRequest {
    pub main_topic: String,
    /// Derived from the SERP page when absent.
    pub intent: Option<Intent>,
}

/// POST /api/v1/clusters
pub async fn handle_create(
    State(state): State<AppState>,
    Json(request): Json<CreateClusterRequest>,
) -> Result<Json<TopicCluster>, AppError> {
    let cluster = state
        .clusters
        .create(&request.main_topic, request.intent)
        .await?;
    Ok(Json(cluster))
}

/// GET /api/v1/clusters
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<TopicCluster>> {
    Json(state.clusters.list())
}

/// GET /api/v1/clusters/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TopicCluster>, AppError> {
    Ok(Json(state.clusters.get(id)?))
}

/// DELETE /api/v1/clusters/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TopicCluster>, AppError> {
    Ok(Json(state.clusters.delete(id)?))
}
