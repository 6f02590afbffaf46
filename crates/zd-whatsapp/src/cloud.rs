//! WhatsApp Business Cloud API client
//!
//! Talks to the graph `messages` endpoint. Success keeps the raw
//! provider body alongside the extracted message id so callers can pass
//! it through untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};

use crate::dispatch::MessageSender;
use crate::error::{Result, WhatsAppError};
use crate::phone;
use crate::types::{
    ErrorEnvelope, MessagePayload, OutboundMessage, SendMessageResponse, SendReceipt,
};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// WhatsApp Cloud API client
#[derive(Clone)]
pub struct CloudApiClient {
    client: Client,
    access_token: String,
    phone_number_id: String,
    api_version: String,
    base_url: String,
}

impl CloudApiClient {
    /// Create a new Cloud API client
    pub fn new(access_token: &str, phone_number_id: &str, api_version: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_string(),
            phone_number_id: phone_number_id.to_string(),
            api_version: api_version.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (sandboxes, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.base_url, self.api_version, self.phone_number_id
        )
    }

    /// Send one message and return the provider receipt.
    pub async fn send_message(&self, to: &str, message: &OutboundMessage) -> Result<SendReceipt> {
        let payload = MessagePayload::new(phone::normalize(to), message);

        debug!("Sending WhatsApp message to {}", to);

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = provider_error_text(status, &body);
            error!("Send to {} failed: {}", to, message);
            return Err(WhatsAppError::Api(message));
        }

        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| WhatsAppError::Parse(e.to_string()))?;
        let parsed: SendMessageResponse =
            serde_json::from_value(raw.clone()).map_err(|e| WhatsAppError::Parse(e.to_string()))?;

        let message_id = parsed
            .messages
            .first()
            .map(|m| m.id.clone())
            .ok_or_else(|| WhatsAppError::Parse("response carries no message id".to_string()))?;

        info!("WhatsApp message {} accepted for {}", message_id, to);

        Ok(SendReceipt { message_id, raw })
    }
}

/// Provider-supplied error text, or a status/body fallback when the body
/// is not the graph error envelope.
fn provider_error_text(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }
    if body.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        format!("{status}: {body}")
    }
}

#[async_trait]
impl MessageSender for CloudApiClient {
    async fn send(&self, to: &str, message: &OutboundMessage) -> Result<SendReceipt> {
        self.send_message(to, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> CloudApiClient {
        CloudApiClient::new("test-token", "123456", "v21.0")
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_provider_error_text_fallbacks() {
        assert_eq!(
            provider_error_text(StatusCode::BAD_REQUEST, r#"{"error":{"message":"boom"}}"#),
            "boom"
        );
        assert_eq!(
            provider_error_text(StatusCode::BAD_GATEWAY, "upstream down"),
            "502 Bad Gateway: upstream down"
        );
        assert_eq!(
            provider_error_text(StatusCode::BAD_REQUEST, ""),
            "request failed with status 400 Bad Request"
        );
    }

    #[tokio::test]
    async fn test_send_text_normalizes_number_and_returns_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/123456/messages"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "5511999990001",
                "type": "text",
                "text": {"body": "hello"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "contacts": [{"input": "5511999990001", "wa_id": "5511999990001"}],
                "messages": [{"id": "wamid.ABC123"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = test_client(&server)
            .send_message(
                "+55 (11) 99999-0001",
                &OutboundMessage::Text("hello".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(receipt.message_id, "wamid.ABC123");
        assert_eq!(receipt.raw["messages"][0]["id"], "wamid.ABC123");
        assert_eq!(receipt.raw["contacts"][0]["wa_id"], "5511999990001");
    }

    #[tokio::test]
    async fn test_send_template_passes_components_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/123456/messages"))
            .and(body_partial_json(serde_json::json!({
                "type": "template",
                "template": {
                    "name": "order_update",
                    "language": {"code": "pt_BR"},
                    "components": [
                        {"type": "body", "parameters": [{"type": "text", "text": "A-1042"}]}
                    ],
                },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{"id": "wamid.TPL1"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let message = OutboundMessage::Template(crate::types::TemplateMessage {
            name: "order_update".to_string(),
            language_code: "pt_BR".to_string(),
            components: vec![serde_json::json!({
                "type": "body",
                "parameters": [{"type": "text", "text": "A-1042"}]
            })],
        });

        let receipt = test_client(&server)
            .send_message("5511999990001", &message)
            .await
            .unwrap();
        assert_eq!(receipt.message_id, "wamid.TPL1");
    }

    #[tokio::test]
    async fn test_graph_error_message_survives_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/123456/messages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "message": "(#131030) Recipient phone number not in allowed list",
                    "type": "OAuthException",
                    "code": 131030,
                }
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .send_message("5511999990001", &OutboundMessage::Text("hi".to_string()))
            .await
            .unwrap_err();

        match err {
            WhatsAppError::Api(message) => {
                assert_eq!(
                    message,
                    "(#131030) Recipient phone number not in allowed list"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_without_message_id_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/123456/messages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"messages": []})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .send_message("5511999990001", &OutboundMessage::Text("hi".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, WhatsAppError::Parse(_)));
    }
}
