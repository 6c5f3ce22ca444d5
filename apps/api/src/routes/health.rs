use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with the service version and SERP mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let serp_mode = match &state.config.serp_provider {
        Some(provider) => provider.name(),
        None => "fallback",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "rankcraft-api",
        "serp_mode": serp_mode
    }))
}
