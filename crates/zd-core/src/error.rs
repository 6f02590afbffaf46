//! Error types for zd-core

use thiserror::Error;

/// Main error type for zd-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for zd-core
pub type Result<T> = std::result::Result<T, Error>;
