//! Operator-level admin allow-list maintenance (startup seeding, CLI).
//!
//! These run outside any chat, so there is no caller to check.

use crate::core::error::AppResult;
use crate::storage::RegistryStore;

/// Adds `ids` to the admin set. Returns how many were not already admins.
/// The file is left untouched when every id is already present.
pub async fn grant_admins(store: &RegistryStore, ids: &[i64]) -> AppResult<usize> {
    let registry = store.load().await?;
    if ids.iter().all(|id| registry.is_admin(*id)) {
        return Ok(0);
    }

    let added = store
        .update(|registry| Ok(ids.iter().filter(|id| registry.admins.insert(**id)).count()))
        .await?;

    log::info!("Granted admin rights to {} new user(s)", added);
    Ok(added)
}

/// Removes `id` from the admin set. Returns whether it was present.
pub async fn revoke_admin(store: &RegistryStore, id: i64) -> AppResult<bool> {
    let removed = store.update(|registry| Ok(registry.admins.remove(&id))).await?;
    if removed {
        log::info!("Revoked admin rights from {}", id);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_grant_and_revoke() {
        let dir = tempfile::tempdir().unwrap();
        let store = RegistryStore::new(dir.path().join("users.json"));

        assert_eq!(grant_admins(&store, &[1, 2, 2]).await.unwrap(), 2);
        assert_eq!(grant_admins(&store, &[1, 3]).await.unwrap(), 1);
        assert!(store.is_admin(3).await.unwrap());

        assert!(revoke_admin(&store, 1).await.unwrap());
        assert!(!revoke_admin(&store, 1).await.unwrap());
        assert!(!store.is_admin(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_grant_nothing_new_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RegistryStore::new(dir.path().join("users.json"));

        assert_eq!(grant_admins(&store, &[]).await.unwrap(), 0);
        assert!(!store.path().exists());
    }
}
