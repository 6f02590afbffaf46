//! zd-gateway: Zapdesk Gateway Main Binary
//!
//! Entry point for the WhatsApp dispatch gateway.
//!
//! Usage:
//!   zd-gateway           - Start the HTTP gateway
//!   zd-gateway --help    - Show help

use tracing_subscriber::EnvFilter;

use zd_api::AppState;
use zd_core::{ChatClient, Config};
use zd_whatsapp::CloudApiClient;

/// Run mode
enum RunMode {
    /// HTTP gateway
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("zd-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Starting zd-gateway...");

    // WhatsApp gateway client (mock mode when credentials are absent)
    let whatsapp = match config.whatsapp.credentials() {
        Some((token, phone_number_id)) => {
            tracing::info!("WhatsApp gateway configured for sender {}", phone_number_id);
            let mut client =
                CloudApiClient::new(token, phone_number_id, &config.whatsapp.api_version)?;
            if let Some(base_url) = &config.whatsapp.base_url {
                client = client.with_base_url(base_url.clone());
            }
            Some(client)
        }
        None => {
            tracing::warn!(
                "WHATSAPP_ACCESS_TOKEN / WHATSAPP_PHONE_NUMBER_ID not set; running in mock mode"
            );
            None
        }
    };

    // LLM chat client (optional)
    let llm = ChatClient::from_config(&config.llm)?;
    match &llm {
        Some(client) => tracing::info!("Chat proxy configured for model {}", client.model()),
        None => tracing::info!("Chat proxy disabled (no API key configured)"),
    }

    let api_port = config.api.port;
    let state = AppState::new(config, whatsapp, llm);

    // Start HTTP API server
    let handle = tokio::spawn(async move {
        if let Err(e) = zd_api::start_server(api_port, state).await {
            tracing::error!("HTTP API error: {}", e);
        }
    });
    tracing::info!("HTTP API server started on port {}", api_port);

    tracing::info!("zd-gateway initialized successfully");
    tracing::info!("Press Ctrl+C to exit");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    handle.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("zd-gateway - Zapdesk WhatsApp dispatch gateway");
    println!();
    println!("Usage:");
    println!("  zd-gateway           Start the HTTP gateway");
    println!("  zd-gateway --help    Show this help message");
    println!("  zd-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  WHATSAPP_ACCESS_TOKEN     Cloud API bearer token (unset = mock mode)");
    println!("  WHATSAPP_PHONE_NUMBER_ID  Sender phone-number id (unset = mock mode)");
    println!("  WHATSAPP_API_VERSION      Graph API version (default: v21.0)");
    println!("  WHATSAPP_API_BASE_URL     Override the graph API base URL");
    println!("  LLM_API_KEY               Chat-completion API key (unset = mock mode)");
    println!("  LLM_MODEL                 Chat model (default: gpt-4o-mini)");
    println!("  LLM_BASE_URL              OpenAI-compatible endpoint base URL");
    println!("  API_PORT                  HTTP port (default: 3000)");
    println!("  API_KEY                   Bearer key protecting /api routes (optional)");
}
