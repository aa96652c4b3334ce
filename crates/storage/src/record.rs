//! Typed load/save over a [`KeyValueStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use super::{KeyValueStore, Result};

/// Load `key` as `T`, falling back to `T::default()` when the key is absent
/// or its blob no longer decodes as `T`.
///
/// Backend failures (I/O) are still returned.
pub async fn load_or_default<T, S>(storage: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(value) = storage.load(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_value(value) {
        Ok(record) => Ok(record),
        Err(e) => {
            warn!("Discarding undecodable record {}: {}", key, e);
            Ok(T::default())
        }
    }
}

/// Serialize `record` and store it under `key`.
pub async fn save_record<T, S>(storage: &mut S, key: &str, record: &T) -> Result<()>
where
    T: Serialize + Sync,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(record)?;
    storage.save(key, &value).await
}
