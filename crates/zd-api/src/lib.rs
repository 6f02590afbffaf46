//! zd-api: HTTP API for the Zapdesk Gateway
//!
//! REST endpoints for single and bulk WhatsApp sends, the agent-assist
//! chat proxy, and the front end's default configuration.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{app, start_server, AppState};
