//! Taskboard Gateway - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard_gateway::infrastructure::driven_adapters::config::AppConfig;
use taskboard_gateway::infrastructure::driven_adapters::http_upstream::HttpUpstreamClient;
use taskboard_gateway::infrastructure::driving_adapters::api_rest::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskboard_gateway=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    tracing::info!("Configuration loaded successfully");

    // Create upstream client
    let upstream_client = Arc::new(HttpUpstreamClient::new(config.upstream.timeout_secs)?);
    tracing::info!(
        base_url = %config.upstream.base_url,
        base_v2_url = %config.upstream.base_v2_url,
        timeout_secs = config.upstream.timeout_secs,
        "Upstream client created"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Build router
    let app = api_rest::router(AppState::new(config, upstream_client));

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
