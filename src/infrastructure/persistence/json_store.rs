//! JSON blob implementation of the registry store.

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::RegistryStore;
use crate::error::AppError;
use crate::infrastructure::persistence::KvStore;
use async_trait::async_trait;
use serde_json::json;

/// Persists the registry as one JSON array under a single key of a
/// [`KvStore`].
///
/// An unparsable blob is logged at error level and treated as an empty
/// registry; corruption never fails the operation that triggered the load.
pub struct JsonRegistryStore<K: KvStore> {
    kv: K,
    key: String,
}

impl<K: KvStore> JsonRegistryStore<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

#[async_trait]
impl<K: KvStore> RegistryStore for JsonRegistryStore<K> {
    async fn load_all(&self) -> Result<Vec<UrlRecord>, AppError> {
        let Some(bytes) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::error!(
                    key = %self.key,
                    error = %e,
                    "registry blob is corrupt, continuing with an empty registry"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, records: &[UrlRecord]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(records).map_err(|e| {
            AppError::internal(
                "Failed to serialize registry",
                json!({ "reason": e.to_string() }),
            )
        })?;

        self.kv.set(&self.key, &bytes).await?;
        tracing::debug!(key = %self.key, count = records.len(), "registry persisted");
        Ok(())
    }
}
