// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use conversion_chart::application::chart_service::ChartService;
use conversion_chart::infrastructure::config::load_app_config;
use conversion_chart::infrastructure::json_repository::JsonFileRepository;
use conversion_chart::presentation::app_state::AppState;
use conversion_chart::presentation::handlers::{
    get_chart, get_tooltip, health_check, list_variations,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Load the dataset once (infrastructure layer)
    let repository = Arc::new(JsonFileRepository::new(config.dataset.path.clone()));
    let dataset_path = repository.path().display().to_string();
    let chart_service = ChartService::load(repository, config.display.locale)
        .await
        .with_context(|| format!("Failed to load dataset from {}", dataset_path))?;

    // Create application state
    let state = Arc::new(AppState {
        chart_service,
        display: config.display,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/variations", get(list_variations))
        .route("/chart", get(get_chart))
        .route("/chart/tooltip", get(get_tooltip))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!("Starting conversion-chart service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
