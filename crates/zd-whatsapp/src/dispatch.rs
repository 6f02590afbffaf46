//! Bulk message dispatch
//!
//! Sends one message per recipient, strictly in input order, with a
//! fixed pause between sends as a self-throttle against the provider's
//! rate limits. A recipient's failure is recorded in its outcome and
//! never aborts the rest of the batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, WhatsAppError};
use crate::types::{OutboundMessage, SendReceipt};

/// Default pause between successive sends, in milliseconds
pub const DEFAULT_INTER_MESSAGE_DELAY_MS: u64 = 100;

/// One-message send seam. The Cloud API client implements it; tests plug
/// in scripted fakes.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send one message, returning the provider receipt
    async fn send(&self, to: &str, message: &OutboundMessage) -> Result<SendReceipt>;
}

/// A bulk send request
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Destinations in send order; duplicates each get their own send
    pub recipients: Vec<String>,
    /// Message delivered to every recipient
    pub message: OutboundMessage,
    /// Pause between successive sends
    pub delay: Duration,
}

impl DispatchRequest {
    /// Request with the default inter-message delay
    pub fn new(recipients: Vec<String>, message: OutboundMessage) -> Self {
        Self {
            recipients,
            message,
            delay: Duration::from_millis(DEFAULT_INTER_MESSAGE_DELAY_MS),
        }
    }

    /// Override the inter-message delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Per-recipient result, reported in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub recipient: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DispatchOutcome {
    fn sent(recipient: &str, message_id: String) -> Self {
        Self {
            recipient: recipient.to_string(),
            success: true,
            provider_message_id: Some(message_id),
            error_message: None,
        }
    }

    fn failed(recipient: &str, error_message: String) -> Self {
        Self {
            recipient: recipient.to_string(),
            success: false,
            provider_message_id: None,
            error_message: Some(error_message),
        }
    }
}

/// Aggregate counters derived from the outcome sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl DispatchSummary {
    fn of(outcomes: &[DispatchOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Everything one bulk invocation produced
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
    pub summary: DispatchSummary,
}

/// Sequential bulk dispatcher over a [`MessageSender`]
pub struct BulkDispatcher<S> {
    sender: S,
    cancel: Arc<AtomicBool>,
}

impl<S: MessageSender> BulkDispatcher<S> {
    /// Dispatcher that runs every batch to completion
    pub fn new(sender: S) -> Self {
        Self {
            sender,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Dispatcher wired to an external cancel flag. Setting the flag
    /// stops the batch before the next send starts.
    pub fn with_cancel_flag(sender: S, cancel: Arc<AtomicBool>) -> Self {
        Self { sender, cancel }
    }

    /// Handle for cancelling a running batch from outside
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the batch: one send per recipient, in order. The error is
    /// batch-level only for an empty recipient list; everything after
    /// that lands in per-recipient outcomes.
    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchReport> {
        if request.recipients.is_empty() {
            return Err(WhatsAppError::EmptyRecipients);
        }

        info!(
            "Dispatching to {} recipient(s) with {}ms delay",
            request.recipients.len(),
            request.delay.as_millis()
        );

        let mut outcomes = Vec::with_capacity(request.recipients.len());

        for (index, recipient) in request.recipients.iter().enumerate() {
            if index > 0 && !request.delay.is_zero() {
                tokio::time::sleep(request.delay).await;
            }

            if self.cancel.load(Ordering::SeqCst) {
                warn!(
                    "Bulk dispatch cancelled after {} of {} send(s)",
                    index,
                    request.recipients.len()
                );
                break;
            }

            match self.sender.send(recipient, &request.message).await {
                Ok(receipt) => {
                    debug!("Recipient {} accepted as {}", recipient, receipt.message_id);
                    outcomes.push(DispatchOutcome::sent(recipient, receipt.message_id));
                }
                Err(err) => {
                    warn!("Recipient {} failed: {}", recipient, err);
                    outcomes.push(DispatchOutcome::failed(recipient, err.outcome_message()));
                }
            }
        }

        let summary = DispatchSummary::of(&outcomes);
        info!(
            "Bulk dispatch finished: {} sent, {} failed of {}",
            summary.succeeded, summary.failed, summary.total
        );

        Ok(DispatchReport { outcomes, summary })
    }
}
