/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use gridmesh_mcp::app::{build_router, AppState};
/// use gridmesh_mcp::config::Config;
/// use gridmesh_mcp::tools;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config, tools::default_registry());
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;
use crate::mcp::{mcp_endpoint, ToolRegistry};

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; both fields are
/// immutable after startup, so clones are cheap `Arc` bumps and requests
/// share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Registered tools
    pub registry: Arc<ToolRegistry>,
}

impl AppState {
    /// Creates new application state
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}

/// Builds the complete Axum router
///
/// # Routes
///
/// ```text
/// GET  /health   # Liveness check (public)
/// POST /mcp      # MCP JSON-RPC endpoint
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive; the credential travels in headers, not cookies)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mcp", post(mcp_endpoint))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
