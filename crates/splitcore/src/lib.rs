//! splitcore - shared-subscription bill splitting without any Telegram code
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `storage`: the JSON registry file (admins, subscribers, settings)
//! - `registry`: registration, settings and listing operations
//! - `billing`: proportional share computation and delivery through a `Notifier`
//! - `conversation`: per-chat state machine for the self-registration flow

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod billing;
pub mod conversation;
pub mod core;
pub mod registry;
pub mod storage;

// Re-export commonly used types for convenience
pub use billing::{distribute, DeliveryError, DistributionSummary, Notifier};
pub use self::core::{AppError, AppResult, BotConfig};
pub use storage::{Registry, RegistryStore, Settings, Subscriber};
