//! Error types for zd-whatsapp

use thiserror::Error;

/// zd-whatsapp error type
#[derive(Error, Debug)]
pub enum WhatsAppError {
    #[error("bulk request has no recipients")]
    EmptyRecipients,

    #[error("WhatsApp API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid WhatsApp API response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WhatsAppError {
    fn from(err: reqwest::Error) -> Self {
        WhatsAppError::Http(err.to_string())
    }
}

impl WhatsAppError {
    /// Error text recorded in a per-recipient outcome: provider-supplied
    /// text verbatim for API rejections, the error description otherwise.
    pub fn outcome_message(&self) -> String {
        match self {
            WhatsAppError::Api(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WhatsAppError>;
