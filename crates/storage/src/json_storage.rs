//! JSON file storage implementation.
//!
//! Stores each key as a pretty-printed `<key>.json` file under a root
//! directory. Writes go through a temporary file and a rename so a crash
//! mid-write leaves the previous blob intact.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;
use super::{KeyValueStore, Result, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for JsonStorage {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(value)?;

        fs::write(&tmp, json.as_bytes()).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }

        debug!("Saved {} ({} bytes)", key, json.len());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        fs::remove_file(path).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}
