//! Telegram implementation of the billing `Notifier`

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use splitcore::{DeliveryError, Notifier};

/// Sends billing notifications as HTML messages to private chats.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, recipient: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(recipient), text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::new(recipient, e.to_string()))
    }
}
