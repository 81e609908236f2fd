//! Handler types, dependencies, and sender helpers

use std::sync::Arc;

use teloxide::types::Message;

use splitcore::conversation::ConversationStore;
use splitcore::{Notifier, RegistryStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<RegistryStore>,
    pub conversations: ConversationStore,
    pub notifier: Arc<dyn Notifier>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(store: Arc<RegistryStore>, conversations: ConversationStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            conversations,
            notifier,
        }
    }
}

/// Sender identity extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub user_id: i64,
    pub full_name: String,
}

impl Sender {
    /// Falls back to the chat when the message has no `from` (channel posts).
    pub fn from_message(msg: &Message) -> Self {
        match msg.from.as_ref() {
            Some(user) => Self {
                user_id: i64::try_from(user.id.0).unwrap_or(0),
                full_name: user.full_name(),
            },
            None => Self {
                user_id: msg.chat.id.0,
                full_name: msg.chat.title().unwrap_or_default().to_string(),
            },
        }
    }
}
