mod cache;
mod clusters;
mod config;
mod content;
mod errors;
mod keywords;
mod models;
mod rng;
mod routes;
mod serp;
mod state;
mod store;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rankcraft API v{}", env!("CARGO_PKG_VERSION"));

    match &config.serp_provider {
        Some(provider) => info!(
            "SERP provider: {} (timeout {:?})",
            provider.name(),
            config.serp_timeout
        ),
        None => warn!("No SERP provider configured, serving generated fallback results"),
    }
    if let Some(seed) = config.seed {
        info!("Deterministic mode, RNG seed {seed}");
    }

    // Build app state
    let state = AppState::from_config(config.clone());

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
