//! LLM chat-completion client and types
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. Used by
//! the agent-assist proxy; nothing here is WhatsApp-specific.

mod client;
mod types;

pub use client::{ChatClient, ChatOutcome};
pub use types::*;
