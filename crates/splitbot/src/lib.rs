//! splitbot - Telegram front end for the bill splitting registry
//!
//! All bookkeeping lives in `splitcore`; this crate wires it to teloxide
//! and exposes a small operator CLI.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramNotifier};
