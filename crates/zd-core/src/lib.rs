//! zd-core: Zapdesk Gateway Core Library
//!
//! Configuration, shared error types, the immutable app defaults served
//! to the CRM front end, and the chat-completion client used for
//! agent-assist replies.

pub mod config;
pub mod defaults;
pub mod error;
pub mod llm;

pub use config::{ApiConfig, Config, LlmConfig, WhatsAppConfig};
pub use defaults::AppDefaults;
pub use error::{Error, Result};
pub use llm::{ChatClient, ChatMessage, ChatOutcome, ChatUsage};
