//! In-memory storage, for tests and ephemeral sessions.

use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::Value;
use super::{KeyValueStore, Result};

/// Map-backed store; contents vanish with the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, Value>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_load_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load("k").await.unwrap().is_none());

        storage.save("k", &json!({"a": 1})).await.unwrap();
        assert_eq!(storage.load("k").await.unwrap(), Some(json!({"a": 1})));

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert!(storage.is_empty());
    }
}
