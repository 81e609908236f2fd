//! Command handler implementations (/start, /help and admin commands)

use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup, Message};
use teloxide::utils::command::BotCommands;

use splitcore::billing::distribute;
use splitcore::conversation::SUBSCRIBE_TRIGGER;
use splitcore::registry::{
    admin_add_subscriber, admin_remove_subscriber, is_registered, list_subscribers, set_link, set_price,
};
use splitcore::{AppError, AppResult};

use super::args::{self, ADD_SUB_USAGE, DEL_SUB_USAGE, SET_LINK_USAGE, SET_PRICE_USAGE};
use super::types::{HandlerDeps, HandlerError, Sender};
use crate::telegram::bot::Command;

/// Sends `text`; a failed reply is logged and otherwise ignored.
pub(super) async fn send_reply(bot: &Bot, chat_id: ChatId, text: impl Into<String>) {
    if let Err(e) = bot.send_message(chat_id, text).await {
        log::warn!("Failed to reply in chat {}: {}", chat_id, e);
    }
}

/// Maps an operation result to the reply text.
///
/// Validation errors become the command's usage hint; storage failures are
/// logged for the operator and never reported as success.
pub(super) fn reply_text(result: AppResult<String>, usage: Option<&str>) -> String {
    match result {
        Ok(text) => text,
        Err(AppError::Validation(reason)) => match usage {
            Some(usage) => usage.to_string(),
            None => AppError::Validation(reason).user_message(),
        },
        Err(e) => {
            if e.is_storage_failure() {
                log::error!("Registry storage failure: {}", e);
            }
            e.user_message()
        }
    }
}

fn subscribe_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(SUBSCRIBE_TRIGGER)]]).resize_keyboard()
}

/// Routes a parsed command to its handler.
pub(super) async fn handle_command(
    bot: &Bot,
    msg: &Message,
    cmd: Command,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let sender = Sender::from_message(msg);
    log::info!("Received command {:?} from user {}", cmd, sender.user_id);

    match cmd {
        Command::Start(_) => handle_start_command(bot, msg, &sender, deps).await,
        Command::Help(_) => {
            send_reply(bot, msg.chat.id, Command::descriptions().to_string()).await;
            Ok(())
        }
        admin_cmd => handle_admin_command(bot, msg, &sender, admin_cmd, deps).await,
    }
}

/// Handle /start command
async fn handle_start_command(
    bot: &Bot,
    msg: &Message,
    sender: &Sender,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let text = match is_registered(&deps.store, sender.user_id).await {
        Ok(true) => "Ты уже в списке подписчиков ✅".to_string(),
        Ok(false) => format!(
            "Привет! Нажми «{}», чтобы указать количество своих подписок 👇",
            SUBSCRIBE_TRIGGER
        ),
        Err(e) => reply_text(Err(e), None),
    };

    if let Err(e) = bot
        .send_message(msg.chat.id, text)
        .reply_markup(subscribe_keyboard())
        .await
    {
        log::warn!("Failed to send /start reply to {}: {}", msg.chat.id, e);
    }
    Ok(())
}

/// Admin-gated commands: rights are checked before any argument parsing.
async fn handle_admin_command(
    bot: &Bot,
    msg: &Message,
    sender: &Sender,
    cmd: Command,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    match deps.store.is_admin(sender.user_id).await {
        Ok(true) => {}
        Ok(false) => {
            send_reply(bot, msg.chat.id, AppError::PermissionDenied.user_message()).await;
            return Ok(());
        }
        Err(e) => {
            send_reply(bot, msg.chat.id, reply_text(Err(e), None)).await;
            return Ok(());
        }
    }

    let caller = sender.user_id;
    let store = &deps.store;

    let text = match cmd {
        Command::AddSub(raw) => {
            let result = async {
                let parsed = args::parse_add_sub(&raw)?;
                let added = admin_add_subscriber(store, caller, parsed.user_id, &parsed.name, parsed.subs).await?;
                Ok::<_, AppError>(format!(
                    "✅ Добавлен {} (ID: {}, подписок: {})",
                    added.name, added.id, added.subs
                ))
            }
            .await;
            reply_text(result, Some(ADD_SUB_USAGE))
        }
        Command::DelSub(raw) => {
            let result = async {
                let user_id = args::parse_del_sub(&raw)?;
                admin_remove_subscriber(store, caller, user_id).await?;
                Ok::<_, AppError>(format!("❌ Подписчик {} удалён", user_id))
            }
            .await;
            reply_text(result, Some(DEL_SUB_USAGE))
        }
        Command::SetPrice(raw) => {
            let result = set_price(store, caller, &raw)
                .await
                .map(|price| format!("💰 Установлена общая сумма {}₽", price));
            reply_text(result, Some(SET_PRICE_USAGE))
        }
        Command::SetLink(raw) => {
            let result = set_link(store, caller, &raw)
                .await
                .map(|link| format!("🔗 Установлена ссылка: {}", link));
            reply_text(result, Some(SET_LINK_USAGE))
        }
        Command::SendPay(_) => {
            let result = distribute(store, caller, deps.notifier.as_ref())
                .await
                .map(|summary| summary.render());
            reply_text(result, None)
        }
        Command::List(_) => {
            let result = list_subscribers(store, caller)
                .await
                .map(|listing| listing.render());
            reply_text(result, None)
        }
        Command::Start(_) | Command::Help(_) => return Ok(()),
    };

    send_reply(bot, msg.chat.id, text).await;
    Ok(())
}
