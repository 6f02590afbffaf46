//! zd-whatsapp: WhatsApp Cloud API channel for the Zapdesk gateway
//!
//! Provides the Cloud API client, the sequential bulk dispatcher with
//! per-recipient outcome tracking, and the phone/template helpers the
//! HTTP layer builds on.

pub mod cloud;
pub mod dispatch;
pub mod error;
pub mod phone;
pub mod template;
pub mod types;

pub use cloud::CloudApiClient;
pub use dispatch::{
    BulkDispatcher, DispatchOutcome, DispatchReport, DispatchRequest, DispatchSummary,
    MessageSender, DEFAULT_INTER_MESSAGE_DELAY_MS,
};
pub use error::{Result, WhatsAppError};
pub use types::{OutboundMessage, SendReceipt, TemplateMessage};
