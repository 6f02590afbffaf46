//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{ai_chat, defaults, health, preview_template, send_bulk, send_message};
use crate::middleware::auth::require_api_key;
use crate::server::AppState;

/// Create the API router
pub fn routes(state: AppState) -> Router {
    // The bearer-key check covers the API surface; health stays open for
    // probes and uptime checks.
    let api = Router::new()
        // WhatsApp sends
        .route("/api/whatsapp/send", post(send_message))
        .route("/api/whatsapp/send-bulk", post(send_bulk))
        // Agent-assist chat proxy
        .route("/api/ai/chat", post(ai_chat))
        // Front-end support
        .route("/api/defaults", get(defaults))
        .route("/api/templates/preview", post(preview_template))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}
