//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use zd_core::{AppDefaults, ChatClient, Config};
use zd_whatsapp::CloudApiClient;

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only when gateway credentials are configured
    pub whatsapp: Option<Arc<CloudApiClient>>,
    /// Present only when an LLM API key is configured
    pub llm: Option<Arc<ChatClient>>,
    pub defaults: Arc<AppDefaults>,
}

impl AppState {
    pub fn new(config: Config, whatsapp: Option<CloudApiClient>, llm: Option<ChatClient>) -> Self {
        Self {
            config: Arc::new(config),
            whatsapp: whatsapp.map(Arc::new),
            llm: llm.map(Arc::new),
            defaults: Arc::new(AppDefaults::builtin()),
        }
    }
}

/// Build the application router with the CORS and trace layers applied.
///
/// CORS is wide open: the CRM front end is served from arbitrary origins
/// and every response, preflight included, carries permissive headers.
pub fn app(state: AppState) -> Router {
    routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP API server
pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
