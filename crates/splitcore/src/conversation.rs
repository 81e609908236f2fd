//! Per-chat conversation state for the self-registration flow.
//!
//! The flow is a two-state machine: a user presses «Подписаться», the bot asks
//! for a number, the next numeric message registers them. Transitions are
//! looked up in [`TRANSITIONS`]; any (state, input) pair not listed there
//! leaves the state untouched and is ignored. Slash commands are never part
//! of the flow, so a command sent mid-dialogue keeps the dialogue waiting.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::Mutex;

/// Button label and free-text trigger for self-registration.
pub const SUBSCRIBE_TRIGGER: &str = "Подписаться";

#[allow(clippy::expect_used)]
static NUMERIC_REPLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Failed to compile numeric regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingSubscriptionCount,
}

/// Coarse classification of a plain (non-command) text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    SubscribeTrigger,
    Number,
    /// `/anything`, including commands the bot does not know
    Command,
    /// Any other text, or a message without text (sticker, photo)
    OtherText,
}

impl InputKind {
    pub fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with('/') {
            InputKind::Command
        } else if trimmed.to_lowercase() == SUBSCRIBE_TRIGGER.to_lowercase() {
            InputKind::SubscribeTrigger
        } else if NUMERIC_REPLY.is_match(trimmed) {
            InputKind::Number
        } else {
            InputKind::OtherText
        }
    }
}

/// What the handler should do for a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ask the user to type their subscription count
    PromptForCount,
    /// Register the typed count
    RegisterCount,
    /// Tell the user a number is expected
    RejectNonNumeric,
    /// Not part of any flow
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ConversationState,
    pub action: Action,
}

use ConversationState::{AwaitingSubscriptionCount as Awaiting, Idle};

/// (current state, input) → (next state, action)
pub const TRANSITIONS: &[(ConversationState, InputKind, ConversationState, Action)] = &[
    (Idle, InputKind::SubscribeTrigger, Awaiting, Action::PromptForCount),
    (Awaiting, InputKind::SubscribeTrigger, Awaiting, Action::PromptForCount),
    (Awaiting, InputKind::Number, Idle, Action::RegisterCount),
    (Awaiting, InputKind::OtherText, Awaiting, Action::RejectNonNumeric),
];

pub fn transition(state: ConversationState, input: InputKind) -> Transition {
    TRANSITIONS
        .iter()
        .find(|(from, kind, _, _)| *from == state && *kind == input)
        .map(|&(_, _, next, action)| Transition { next, action })
        .unwrap_or(Transition {
            next: state,
            action: Action::Ignore,
        })
}

/// In-memory conversation states keyed by chat id. Idle chats are not stored.
#[derive(Clone, Default)]
pub struct ConversationStore {
    states: Arc<Mutex<HashMap<i64, ConversationState>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat_id: i64) -> ConversationState {
        self.states.lock().await.get(&chat_id).copied().unwrap_or_default()
    }

    pub async fn set(&self, chat_id: i64, state: ConversationState) {
        let mut states = self.states.lock().await;
        match state {
            ConversationState::Idle => {
                states.remove(&chat_id);
            }
            other => {
                states.insert(chat_id, other);
            }
        }
    }

    /// Classifies `text`, applies the transition for `chat_id` and returns it.
    pub async fn advance(&self, chat_id: i64, text: &str) -> Transition {
        self.advance_with(chat_id, InputKind::classify(text)).await
    }

    /// Applies the transition for an already classified input.
    pub async fn advance_with(&self, chat_id: i64, input: InputKind) -> Transition {
        let mut states = self.states.lock().await;
        let current = states.get(&chat_id).copied().unwrap_or_default();
        let step = transition(current, input);
        match step.next {
            ConversationState::Idle => {
                states.remove(&chat_id);
            }
            next => {
                states.insert(chat_id, next);
            }
        }
        step
    }
}
