//! Telegram bot handler tree configuration
//!
//! The handlers are organized so that integration tests can drive the same
//! logic as production without building Telegram `Message` objects.

mod args;
mod commands;
mod registration;
mod schema;
mod types;

pub use registration::{non_text_reply, registration_reply, NUMBER_EXPECTED, PROMPT_FOR_COUNT};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, Sender};
