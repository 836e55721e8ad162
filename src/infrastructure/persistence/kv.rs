//! Key-value blob boundary and the in-memory implementation.

use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Generic durable key-value medium with get/set semantics.
///
/// One opaque blob per key, replaced wholesale on every write. The registry
/// treats this as an external collaborator and owns nothing about how the
/// bytes are kept.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the blob stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Replaces the blob stored under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError>;
}

/// In-memory key-value store.
///
/// Used by tests and ephemeral registries; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
