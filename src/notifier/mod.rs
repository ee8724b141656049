//! Outbound delivery of the rendered report.
//!
//! - [`Notifier`]: async trait the pipeline delivers through
//! - [`ResendNotifier`]: Resend email API client
//! - [`FallbackNotifier`]: applies an [`OnRestricted`] policy around another notifier

mod fallback;
mod resend;

pub use fallback::FallbackNotifier;
pub use resend::ResendNotifier;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One email as handed to the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message id
    pub id: String,
    /// Addresses the message was actually sent to
    pub recipients: Vec<String>,
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("API key rejected: {0}")]
    InvalidCredential(String),

    #[error("sender not verified: {0}")]
    SenderUnverified(String),

    #[error("recipient rejected: {0}")]
    RecipientRejected(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The provider only allows sending to a restricted set of addresses.
    #[error("sending restricted: {0}")]
    Restricted(String),

    #[error("provider returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What to do when the provider refuses the recipient list as restricted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OnRestricted {
    #[default]
    Fail,
    /// Resend once to this single address.
    RedirectTo(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<DeliveryReceipt, DeliveryError>;
}
