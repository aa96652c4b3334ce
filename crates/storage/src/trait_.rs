//! Key-value storage trait abstraction.

use async_trait::async_trait;
use serde_json::Value;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be mapped to a storage location
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Durable key-value facility holding JSON blobs.
///
/// Absent keys load as `None`; callers substitute their own defaults.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the blob stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous blob.
    async fn save(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Delete `key`. Missing keys are not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;
}
