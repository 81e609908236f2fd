//! Flat-file registry store.
//!
//! The whole registry lives in one JSON file. Every operation reads it fresh;
//! every mutation rewrites it completely. Mutations are serialized through a
//! single async mutex so that two concurrent updates cannot drop each other.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::models::Registry;
use crate::core::error::AppResult;

pub struct RegistryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RegistryStore {
    /// Creates a store backed by `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current registry, or an empty one if nothing was saved yet.
    ///
    /// A file that exists but cannot be parsed is an error: falling back to
    /// defaults here would let the next save wipe the real data.
    pub async fn load(&self) -> AppResult<Registry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Registry file {} not found, starting empty", self.path.display());
                return Ok(Registry::default());
            }
            Err(e) => {
                log::error!("Failed to read registry {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Registry::default());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Registry file {} is corrupt: {}", self.path.display(), e);
            e.into()
        })
    }

    /// Overwrites the registry file with `registry`.
    ///
    /// The JSON goes to a sibling temp file which is fsynced and then renamed
    /// into place, so a crash mid-write leaves the previous version intact.
    pub async fn save(&self, registry: &Registry) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(registry)?;

        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.tmp_path();
        let write_result = async {
            write_synced(&tmp_path, &json).await?;
            tokio::fs::rename(&tmp_path, &self.path).await
        }
        .await;

        if let Err(e) = write_result {
            log::error!("Failed to save registry {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        sync_directory(parent.unwrap_or_else(|| Path::new("."))).await;

        log::debug!(
            "Saved registry: {} admins, {} subscribers",
            registry.admins.len(),
            registry.subscribers.len()
        );
        Ok(())
    }

    pub async fn is_admin(&self, user_id: i64) -> AppResult<bool> {
        Ok(self.load().await?.is_admin(user_id))
    }

    /// Load, mutate and save as one critical section.
    ///
    /// Nothing is written when `mutate` returns an error.
    pub async fn update<T, F>(&self, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut Registry) -> AppResult<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut registry = self.load().await?;
        let value = mutate(&mut registry)?;
        self.save(&registry).await?;
        Ok(value)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "registry".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Best-effort sync of the directory entry after a rename.
#[cfg(unix)]
async fn sync_directory(dir: &Path) {
    let synced = match File::open(dir).await {
        Ok(handle) => handle.sync_all().await,
        Err(e) => Err(e),
    };
    if let Err(e) = synced {
        log::debug!("Could not sync directory {}: {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
async fn sync_directory(_dir: &Path) {}
