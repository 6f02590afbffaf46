//! Chat completion HTTP client

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible chat-completion API
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Reply extracted from a chat completion
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub model: String,
    pub usage: Option<ChatUsage>,
}

impl ChatClient {
    /// Create a chat client from configuration; `None` when no API key is
    /// set, which puts the chat proxy into mock mode.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Some(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url,
        }))
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a completion for the given conversation
    pub async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u64) -> Result<ChatOutcome> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending chat completion request to {}", url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(max_tokens),
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Chat completion error: {} - {}", status, body);
            return Err(Error::LlmApi(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::LlmApi(format!("Failed to parse response: {} - {}", e, body)))?;

        let reply = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        info!(
            "Chat completion: model={}, tokens={}",
            parsed.model,
            parsed.usage.as_ref().map(|u| u.completion_tokens).unwrap_or(0)
        );

        Ok(ChatOutcome {
            reply,
            model: parsed.model,
            usage: parsed.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> LlmConfig {
        LlmConfig {
            api_key: Some("test-key".to_string()),
            model: "gpt-4o-mini".to_string(),
            base_url: Some(server.uri()),
        }
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = LlmConfig::default();
        assert!(ChatClient::from_config(&config).unwrap().is_none());

        let config = LlmConfig {
            api_key: Some(String::new()),
            ..LlmConfig::default()
        };
        assert!(ChatClient::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o-mini",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::from_config(&test_config(&server)).unwrap().unwrap();
        let outcome = client
            .complete(vec![ChatMessage::user("hello")], 256)
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Hi there");
        assert_eq!(outcome.model, "gpt-4o-mini");
        assert_eq!(outcome.usage.unwrap().total_tokens, 8);
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limited"}"#),
            )
            .mount(&server)
            .await;

        let client = ChatClient::from_config(&test_config(&server)).unwrap().unwrap();
        let err = client
            .complete(vec![ChatMessage::user("hello")], 256)
            .await
            .unwrap_err();

        match err {
            Error::LlmApi(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("rate limited"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_with_no_choices_yields_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-2",
                "model": "gpt-4o-mini",
                "choices": []
            })))
            .mount(&server)
            .await;

        let client = ChatClient::from_config(&test_config(&server)).unwrap().unwrap();
        let outcome = client
            .complete(vec![ChatMessage::user("hello")], 256)
            .await
            .unwrap();

        assert!(outcome.reply.is_empty());
    }
}
