//! Registry persistence

pub mod models;
pub mod store;

// Re-exports for convenience
pub use models::{Registry, Settings, Subscriber};
pub use store::RegistryStore;
