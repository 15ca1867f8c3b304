//! Axum server assembly.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::WebAppState;
use crate::continuation::MAX_CONTINUATIONS;

/// Server configuration options.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Capacity of the continuation registry; oldest suspended sessions are
    /// evicted beyond this.
    pub max_continuations: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_continuations: MAX_CONTINUATIONS,
        }
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint handler.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes.
pub fn build_router(state: WebAppState) -> Router {
    Router::new()
        .route("/", get(handlers::start_session))
        .route("/k/{token}", post(handlers::resume_session))
        .route("/import", post(handlers::import_quiz))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
///
/// This starts the Axum server and blocks until shutdown.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = WebAppState::new(config.max_continuations);
    let app = build_router(state);

    tracing::info!("starting popquiz at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
