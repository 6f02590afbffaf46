//! Error types for zd-api

use thiserror::Error;

/// zd-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Core error: {0}")]
    Core(#[from] zd_core::Error),

    #[error("WhatsApp error: {0}")]
    WhatsApp(#[from] zd_whatsapp::WhatsAppError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
