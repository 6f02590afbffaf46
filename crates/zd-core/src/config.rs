//! Configuration management
//!
//! All settings come from environment variables; the binary loads a `.env`
//! file before calling [`Config::from_env`]. Gateway and LLM credentials
//! are optional on purpose: when they are absent the service starts in
//! mock mode and flags that in its responses instead of failing at boot.

use serde::{Deserialize, Serialize};

/// WhatsApp Business Cloud API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Bearer access token for the Cloud API
    pub access_token: Option<String>,

    /// Phone-number id the messages are sent from
    pub phone_number_id: Option<String>,

    /// Graph API version segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Base URL override (sandboxes, tests)
    pub base_url: Option<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            api_version: default_api_version(),
            base_url: None,
        }
    }
}

impl WhatsAppConfig {
    /// Token and phone-number id, when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.access_token.as_deref(), self.phone_number_id.as_deref()) {
            (Some(token), Some(id)) if !token.is_empty() && !id.is_empty() => Some((token, id)),
            _ => None,
        }
    }

    /// Whether real sends are possible
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key (optional; the chat proxy mocks without it)
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible endpoint
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer key protecting the `/api` routes (unset = open)
    pub key: Option<String>,

    /// Port for the HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            port: default_api_port(),
        }
    }
}

/// Main configuration for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// WhatsApp gateway configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// HTTP API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_version() -> String {
    "v21.0".to_string()
}

fn default_api_port() -> u16 {
    3000
}

/// Read an environment variable, treating empty values as unset.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Config {
            whatsapp: WhatsAppConfig {
                access_token: env_opt("WHATSAPP_ACCESS_TOKEN"),
                phone_number_id: env_opt("WHATSAPP_PHONE_NUMBER_ID"),
                api_version: env_opt("WHATSAPP_API_VERSION").unwrap_or_else(default_api_version),
                base_url: env_opt("WHATSAPP_API_BASE_URL"),
            },
            llm: LlmConfig {
                api_key: env_opt("LLM_API_KEY"),
                model: env_opt("LLM_MODEL").unwrap_or_else(default_model),
                base_url: env_opt("LLM_BASE_URL"),
            },
            api: ApiConfig {
                key: env_opt("API_KEY"),
                port: env_opt("API_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(default_api_port()),
            },
        }
    }
}
