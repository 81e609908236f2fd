//! Self-registration flow driven by the conversation state machine

use teloxide::prelude::*;
use teloxide::types::Message;

use splitcore::conversation::{Action, ConversationState, InputKind};
use splitcore::registry::{register_self, Registration};

use super::commands::{reply_text, send_reply};
use super::types::{HandlerDeps, HandlerError, Sender};

pub const PROMPT_FOR_COUNT: &str = "Введите количество своих подписок (числом):";
pub const NUMBER_EXPECTED: &str = "Пожалуйста, введи число.";

/// Advances the sender's conversation with `text` and returns the reply, if any.
///
/// A failed registration puts the conversation back into
/// `AwaitingSubscriptionCount` so the user can simply try again.
pub async fn registration_reply(deps: &HandlerDeps, sender: &Sender, text: &str) -> Option<String> {
    let step = deps.conversations.advance(sender.user_id, text).await;

    match step.action {
        Action::Ignore => None,
        Action::PromptForCount => Some(PROMPT_FOR_COUNT.to_string()),
        Action::RejectNonNumeric => Some(NUMBER_EXPECTED.to_string()),
        Action::RegisterCount => match register_self(&deps.store, sender.user_id, &sender.full_name, text).await {
            Ok(Registration::Created { subs }) => Some(format!("🎉 Ты добавлен как подписчик с {} подписками!", subs)),
            Ok(Registration::Updated { subs }) => Some(format!("✅ Обновлено количество подписок: {}", subs)),
            Err(e) => {
                deps.conversations
                    .set(sender.user_id, ConversationState::AwaitingSubscriptionCount)
                    .await;
                Some(reply_text(Err(e), None))
            }
        },
    }
}

/// Reply for a message without text (sticker, photo, voice).
///
/// Only a user who was asked for a number hears back.
pub async fn non_text_reply(deps: &HandlerDeps, sender: &Sender) -> Option<String> {
    let step = deps.conversations.advance_with(sender.user_id, InputKind::OtherText).await;
    match step.action {
        Action::RejectNonNumeric => Some(NUMBER_EXPECTED.to_string()),
        _ => None,
    }
}

/// Endpoint for every message that is not a recognized command.
pub(super) async fn handle_plain_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let sender = Sender::from_message(msg);

    let reply = match msg.text() {
        Some(text) => registration_reply(deps, &sender, text).await,
        None => non_text_reply(deps, &sender).await,
    };

    if let Some(reply) = reply {
        send_reply(bot, msg.chat.id, reply).await;
    }
    Ok(())
}
