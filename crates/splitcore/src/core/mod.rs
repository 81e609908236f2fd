//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::BotConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logger;
