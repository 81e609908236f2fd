//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_command;
use super::registration::handle_plain_message;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Commands are matched first and never touch the conversation state; every
/// other message goes through the self-registration state machine, which
/// also ignores unrecognized `/commands`.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
}

/// Handler for bot commands (/start, /add_sub, /send_pay, etc.)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                if let Err(e) = handle_command(&bot, &msg, cmd, &deps).await {
                    log::error!("Command handler failed in chat {}: {}", msg.chat.id, e);
                }
                Ok(())
            }
        },
    ))
}

/// Handler for everything else (subscription flow), text or not
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let deps = deps.clone();
        async move {
            if let Err(e) = handle_plain_message(&bot, &msg, &deps).await {
                log::error!("Message handler failed in chat {}: {}", msg.chat.id, e);
            }
            Ok(())
        }
    })
}
