//! File-backed key-value store.

use crate::error::AppError;
use crate::infrastructure::persistence::KvStore;
use async_trait::async_trait;
use serde_json::json;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// Stores each key as one file under a root directory.
///
/// Writes land in a temporary sibling file first and are moved into place
/// with a rename, so a reader only ever observes a complete blob even if the
/// process dies mid-write.
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::internal(
                "Failed to read store file",
                json!({ "key": key, "reason": e.to_string() }),
            )),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::internal(
                "Failed to create store directory",
                json!({ "dir": self.root.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        let target = self.path_for(key);
        let tmp = self.path_for(&format!("{key}.tmp"));

        fs::write(&tmp, value).await.map_err(|e| {
            AppError::internal(
                "Failed to write store file",
                json!({ "key": key, "reason": e.to_string() }),
            )
        })?;

        // Rename is atomic on the same filesystem; the target is never half-written.
        fs::rename(&tmp, &target).await.map_err(|e| {
            AppError::internal(
                "Failed to replace store file",
                json!({ "key": key, "reason": e.to_string() }),
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_absent_key() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path());
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_root_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path().join("nested"));

        store.set("registry", b"payload").await.unwrap();
        assert_eq!(
            store.get("registry").await.unwrap(),
            Some(b"payload".to_vec())
        );
    }

    #[tokio::test]
    async fn test_set_replaces_previous_blob() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path());

        store.set("registry", b"first").await.unwrap();
        store.set("registry", b"second, longer payload").await.unwrap();

        assert_eq!(
            store.get("registry").await.unwrap(),
            Some(b"second, longer payload".to_vec())
        );
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileKvStore::new(dir.path());

        store.set("registry", b"payload").await.unwrap();
        assert!(!dir.path().join("registry.tmp").exists());
    }
}
