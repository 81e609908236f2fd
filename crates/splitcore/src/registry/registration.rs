//! Subscriber registration and removal

use super::{ensure_admin, parse_count};
use crate::core::error::AppResult;
use crate::storage::{RegistryStore, Subscriber};

/// Outcome of a self-registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// New subscriber appended
    Created { subs: u32 },
    /// Existing subscriber's count replaced
    Updated { subs: u32 },
}

impl Registration {
    pub fn subs(&self) -> u32 {
        match self {
            Registration::Created { subs } | Registration::Updated { subs } => *subs,
        }
    }
}

/// Registers the caller, or updates their count if they are already listed.
///
/// `raw_subs` is the text the user typed; anything other than a plain
/// non-negative integer is rejected before the registry is touched.
pub async fn register_self(store: &RegistryStore, user_id: i64, name: &str, raw_subs: &str) -> AppResult<Registration> {
    let subs = parse_count(raw_subs)?;

    let outcome = store
        .update(|registry| {
            if let Some(existing) = registry.find_subscriber_mut(user_id) {
                existing.subs = subs;
                existing.name = name.to_string();
                Ok(Registration::Updated { subs })
            } else {
                registry.subscribers.push(Subscriber::new(user_id, name, subs));
                Ok(Registration::Created { subs })
            }
        })
        .await?;

    log::info!("Self-registration by {} ({}): {:?}", user_id, name, outcome);
    Ok(outcome)
}

/// Appends a subscriber on an admin's behalf.
///
/// Unlike [`register_self`] there is no lookup by id: adding an id that is
/// already listed produces a second entry.
pub async fn admin_add_subscriber(
    store: &RegistryStore,
    caller: i64,
    user_id: i64,
    name: &str,
    subs: u32,
) -> AppResult<Subscriber> {
    let subscriber = Subscriber::new(user_id, name, subs);
    let added = subscriber.clone();

    store
        .update(move |registry| {
            ensure_admin(registry, caller)?;
            registry.subscribers.push(added);
            Ok(())
        })
        .await?;

    log::info!("Admin {} added subscriber {:?}", caller, subscriber);
    Ok(subscriber)
}

/// Removes every entry with `user_id`. Returns how many were removed;
/// removing an unknown id is not an error.
pub async fn admin_remove_subscriber(store: &RegistryStore, caller: i64, user_id: i64) -> AppResult<usize> {
    let removed = store
        .update(|registry| {
            ensure_admin(registry, caller)?;
            let before = registry.subscribers.len();
            registry.subscribers.retain(|s| s.id != user_id);
            Ok(before - registry.subscribers.len())
        })
        .await?;

    log::info!("Admin {} removed subscriber {} ({} entries)", caller, user_id, removed);
    Ok(removed)
}

/// Whether `user_id` already appears in the subscriber list.
pub async fn is_registered(store: &RegistryStore, user_id: i64) -> AppResult<bool> {
    Ok(store.load().await?.has_subscriber(user_id))
}
