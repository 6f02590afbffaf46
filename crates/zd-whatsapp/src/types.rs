//! WhatsApp Cloud API wire types

use serde::{Deserialize, Serialize};

/// What to deliver to a recipient
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    /// Plain text body
    Text(String),
    /// Pre-approved template reference
    Template(TemplateMessage),
}

/// Reference to a pre-approved message template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMessage {
    pub name: String,
    pub language_code: String,
    /// Parameter blocks, passed through to the gateway verbatim
    #[serde(default)]
    pub components: Vec<serde_json::Value>,
}

/// Result of one accepted gateway send
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider message id (`messages[0].id`)
    pub message_id: String,
    /// Untouched provider response body
    pub raw: serde_json::Value,
}

// ============================================================================
// Request payloads
// ============================================================================

/// `POST /<phone_number_id>/messages` body
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub messaging_product: &'static str,
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplatePayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextPayload {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatePayload {
    pub name: String,
    pub language: LanguagePayload,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguagePayload {
    pub code: String,
}

impl MessagePayload {
    /// Build the kind-specific body for one outbound message.
    pub fn new(to: impl Into<String>, message: &OutboundMessage) -> Self {
        match message {
            OutboundMessage::Text(body) => Self {
                messaging_product: "whatsapp",
                to: to.into(),
                message_type: "text",
                text: Some(TextPayload { body: body.clone() }),
                template: None,
            },
            OutboundMessage::Template(template) => Self {
                messaging_product: "whatsapp",
                to: to.into(),
                message_type: "template",
                text: None,
                template: Some(TemplatePayload {
                    name: template.name.clone(),
                    language: LanguagePayload {
                        code: template.language_code.clone(),
                    },
                    components: template.components.clone(),
                }),
            },
        }
    }
}

// ============================================================================
// Response payloads
// ============================================================================

/// Successful send response (the subset we rely on)
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messages: Vec<MessageId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageId {
    pub id: String,
}

/// Error envelope returned on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}
