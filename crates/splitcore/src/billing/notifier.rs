//! Outbound delivery seam.
//!
//! The billing module has zero teloxide dependency: it hands finished texts to
//! a [`Notifier`], and the bot crate provides the Telegram implementation.

use async_trait::async_trait;
use thiserror::Error;

/// A single recipient could not be reached (blocked the bot, never started it, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("delivery to {recipient} failed: {reason}")]
pub struct DeliveryError {
    pub recipient: i64,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(recipient: i64, reason: impl Into<String>) -> Self {
        Self {
            recipient,
            reason: reason.into(),
        }
    }
}

/// Sends a text message to one recipient.
///
/// Implementations must not panic on a per-recipient failure; they report it
/// through `DeliveryError` and the caller moves on to the next recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// `text` is HTML-formatted.
    async fn notify(&self, recipient: i64, text: &str) -> Result<(), DeliveryError>;
}
