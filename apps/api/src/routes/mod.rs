pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::clusters::handlers as clusters;
use crate::content::handlers as content;
use crate::keywords::handlers as keywords;
use crate::serp::handlers as serp;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keywords
        .route("/api/v1/keywords", get(keywords::handle_list))
        .route("/api/v1/keywords/analyze", post(keywords::handle_analyze))
        .route("/api/v1/keywords/expand", post(keywords::handle_expand))
        .route(
            "/api/v1/keywords/:id",
            get(keywords::handle_get).delete(keywords::handle_delete),
        )
        // Query fan-out
        .route("/api/v1/queries/fanout", post(keywords::handle_fan_out))
        .route(
            "/api/v1/queries/fanout/export",
            post(keywords::handle_fan_out_export),
        )
        // SERP
        .route("/api/v1/serp", post(serp::handle_lookup))
        .route("/api/v1/serp/live", post(serp::handle_live))
        // Content
        .route("/api/v1/content", get(content::handle_list))
        .route("/api/v1/content/generate", post(content::handle_generate))
        .route("/api/v1/content/score", post(content::handle_score))
        .route(
            "/api/v1/content/:id",
            get(content::handle_get).delete(content::handle_delete),
        )
        .route("/api/v1/content/:id/export", get(content::handle_export))
        // Topic clusters
        .route(
            "/api/v1/clusters",
            get(clusters::handle_list).post(clusters::handle_create),
        )
        .route(
            "/api/v1/clusters/:id",
            get(clusters::handle_get).delete(clusters::handle_delete),
        )
        .with_state(state)
}
