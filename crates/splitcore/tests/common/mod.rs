//! Common test utilities
//!
//! Shared by the registry and billing integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use splitcore::{DeliveryError, Notifier, Registry, RegistryStore};
use tempfile::TempDir;

pub const ADMIN: i64 = 1000;
pub const STRANGER: i64 = 2000;

/// A store in a fresh temp directory. Keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, RegistryStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = RegistryStore::new(dir.path().join("users.json"));
    (dir, store)
}

/// A store whose admin set contains [`ADMIN`].
pub async fn store_with_admin() -> (TempDir, RegistryStore) {
    let (dir, store) = temp_store();
    let mut registry = Registry::default();
    registry.admins.insert(ADMIN);
    store.save(&registry).await.unwrap();
    (dir, store)
}

/// Records every message and fails for the recipients it was told to reject.
#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(i64, String)>>,
    blocked: HashSet<i64>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocking(recipients: &[i64]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            blocked: recipients.iter().copied().collect(),
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn text_for(&self, recipient: i64) -> Option<String> {
        self.sent()
            .into_iter()
            .find(|(id, _)| *id == recipient)
            .map(|(_, text)| text)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, recipient: i64, text: &str) -> Result<(), DeliveryError> {
        if self.blocked.contains(&recipient) {
            return Err(DeliveryError::new(recipient, "Forbidden: bot was blocked by the user"));
        }
        self.sent.lock().unwrap().push((recipient, text.to_string()));
        Ok(())
    }
}
