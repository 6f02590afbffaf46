//! HTTP API handlers
//!
//! Request handlers for WhatsApp sends, the agent-assist chat proxy, and
//! template utilities. Single sends pass the raw gateway response
//! through; bulk sends answer 200 with per-recipient outcomes once the
//! batch ran, even when every send failed.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use zd_core::{AppDefaults, ChatMessage, ChatUsage};
use zd_whatsapp::template::render_variables;
use zd_whatsapp::{
    BulkDispatcher, DispatchOutcome, DispatchRequest, DispatchSummary, OutboundMessage,
    TemplateMessage, WhatsAppError, DEFAULT_INTER_MESSAGE_DELAY_MS,
};

use crate::error::ApiError;
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Message kind selector (`type` on the wire)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Template,
}

/// Template reference as received over HTTP
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRef {
    pub name: String,
    pub language_code: String,
    #[serde(default)]
    pub components: Vec<serde_json::Value>,
}

impl From<TemplateRef> for TemplateMessage {
    fn from(template: TemplateRef) -> Self {
        Self {
            name: template.name,
            language_code: template.language_code,
            components: template.components,
        }
    }
}

/// Single-send request payload
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Destination phone number
    pub to: String,
    /// Text body (ignored for template sends)
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub template: Option<TemplateRef>,
}

/// Bulk-send request payload
#[derive(Debug, Deserialize)]
pub struct BulkSendRequest {
    /// Destinations, sent in order
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Text body (ignored for template sends)
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub template: Option<TemplateRef>,
    /// Pause between sends, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    DEFAULT_INTER_MESSAGE_DELAY_MS
}

/// Bulk-send response payload
#[derive(Debug, Serialize)]
pub struct BulkSendResponse {
    pub results: Vec<DispatchOutcome>,
    pub summary: DispatchSummary,
}

/// Chat proxy request payload
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
    /// System prompt override
    pub system: Option<String>,
    /// Max tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u64,
}

fn default_max_tokens() -> u64 {
    1024
}

/// Chat proxy response payload
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ChatUsage>,
}

/// Template preview request payload
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub body: String,
    /// Caller values; they win over the built-in samples
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Template preview response payload
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub rendered: String,
}

/// Flagged response returned when upstream credentials are missing
#[derive(Debug, Serialize)]
pub struct MockResponse {
    pub mock: bool,
    pub note: &'static str,
}

impl MockResponse {
    fn gateway() -> Self {
        Self {
            mock: true,
            note: "WhatsApp credentials are not configured; no message was sent",
        }
    }

    fn llm() -> Self {
        Self {
            mock: true,
            note: "LLM credentials are not configured; no completion was requested",
        }
    }
}

/// Generic API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an internal error onto the HTTP error contract. Provider-supplied
/// text survives verbatim in the `error` field.
fn reject(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, error) = match err {
        ApiError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
        ApiError::WhatsApp(WhatsAppError::EmptyRecipients) => (
            StatusCode::BAD_REQUEST,
            WhatsAppError::EmptyRecipients.to_string(),
        ),
        ApiError::WhatsApp(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.outcome_message()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    };
    (status, Json(ErrorResponse { error }))
}

/// Build the outbound message from the wire fields.
fn build_message(
    kind: MessageKind,
    message: String,
    template: Option<TemplateRef>,
) -> Result<OutboundMessage, ApiError> {
    match kind {
        MessageKind::Text => {
            if message.is_empty() {
                return Err(ApiError::InvalidRequest(
                    "message text is required".to_string(),
                ));
            }
            Ok(OutboundMessage::Text(message))
        }
        MessageKind::Template => {
            let template = template.ok_or_else(|| {
                ApiError::InvalidRequest("type is \"template\" but no template was given".to_string())
            })?;
            Ok(OutboundMessage::Template(template.into()))
        }
    }
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Single send endpoint; answers with the raw gateway response JSON.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    debug!("Send request for {}", req.to);

    let Some(client) = &state.whatsapp else {
        info!("Gateway not configured; mock response for {}", req.to);
        return Ok(Json(MockResponse::gateway()).into_response());
    };

    let message = build_message(req.kind, req.message, req.template).map_err(reject)?;

    match client.send_message(&req.to, &message).await {
        Ok(receipt) => Ok(Json(receipt.raw).into_response()),
        Err(e) => {
            error!("Send to {} failed: {}", req.to, e);
            Err(reject(ApiError::WhatsApp(e)))
        }
    }
}

/// Bulk send endpoint. Answers 200 once the batch ran; per-recipient
/// status lives in the results.
pub async fn send_bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkSendRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    debug!("Bulk send request for {} recipient(s)", req.recipients.len());

    let Some(client) = &state.whatsapp else {
        info!("Gateway not configured; mock response for bulk send");
        return Ok(Json(MockResponse::gateway()).into_response());
    };

    let message = build_message(req.kind, req.message, req.template).map_err(reject)?;
    let request = DispatchRequest::new(req.recipients, message)
        .with_delay(Duration::from_millis(req.delay_ms));

    let dispatcher = BulkDispatcher::new(client.as_ref().clone());
    match dispatcher.dispatch(&request).await {
        Ok(report) => {
            info!(
                "Bulk send finished: {}/{} accepted by the gateway",
                report.summary.succeeded, report.summary.total
            );
            Ok(Json(BulkSendResponse {
                results: report.outcomes,
                summary: report.summary,
            })
            .into_response())
        }
        Err(e) => Err(reject(ApiError::WhatsApp(e))),
    }
}

/// Chat endpoint; proxies one exchange to the configured LLM.
pub async fn ai_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    debug!("Chat request: {} chars", req.message.len());

    let Some(client) = &state.llm else {
        info!("LLM not configured; mock response");
        return Ok(Json(MockResponse::llm()).into_response());
    };

    let mut messages = Vec::new();
    if let Some(system) = req.system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(req.message));

    match client.complete(messages, req.max_tokens).await {
        Ok(outcome) => Ok(Json(ChatResponse {
            reply: outcome.reply,
            model: outcome.model,
            usage: outcome.usage,
        })
        .into_response()),
        Err(e) => {
            error!("Chat completion failed: {}", e);
            Err(reject(ApiError::Core(e)))
        }
    }
}

/// Immutable default configuration for the front end
pub async fn defaults(State(state): State<AppState>) -> Json<AppDefaults> {
    Json(state.defaults.as_ref().clone())
}

/// Render a template body with sample plus caller-supplied variables.
pub async fn preview_template(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let mut vars = state.defaults.sample_variables.clone();
    vars.extend(req.variables);

    Json(PreviewResponse {
        rendered: render_variables(&req.body, &vars),
    })
}
