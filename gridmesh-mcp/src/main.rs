//! # GridMesh MCP Server
//!
//! MCP server exposing the GridMesh batch-compute platform to AI agents:
//! task submission, status polling, log retrieval, lifecycle control, and
//! profile discovery, driven through structured tool invocations.
//!
//! ## Usage
//!
//! ```bash
//! GRIDMESH_BASE_URL=https://api.gridmesh.io cargo run -p gridmesh-mcp
//! ```

use gridmesh_mcp::app::{build_router, AppState};
use gridmesh_mcp::config::Config;
use gridmesh_mcp::tools;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridmesh_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = %config.platform.base_url,
        "GridMesh MCP Server starting"
    );

    let bind_address = config.bind_address();
    let state = AppState::new(config, tools::default_registry());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when ctrl-c is received
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
