//! JSON file storage implementation.
//!
//! Stores one `<key>.json` file per key under a data directory. An optional
//! byte quota caps the total size of all stored values.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::trait_::{check_key, check_quota};
use super::{Result, Storage};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
    quota_bytes: Option<u64>,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            quota_bytes: None,
        })
    }

    /// Cap the total bytes this store may hold.
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    async fn used_bytes_excluding(&self, key: &str) -> Result<u64> {
        let mut used = 0;
        let mut rd = fs::read_dir(&self.root).await?;
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if path.file_stem().and_then(|s| s.to_str()) == Some(key) {
                continue;
            }
            used += entry.metadata().await?.len();
        }
        Ok(used)
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.key_path(key)).await {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        if self.quota_bytes.is_some() {
            let used = self.used_bytes_excluding(key).await?;
            check_quota(key, self.quota_bytes, used, value.len() as u64)?;
        }
        fs::write(self.key_path(key), value.as_bytes()).await?;
        debug!("Wrote {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        check_key(key)?;
        fs::remove_file(self.key_path(key)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut rd = fs::read_dir(&self.root).await?;
        while let Some(entry) = rd.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    #[tokio::test]
    async fn test_write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.read("sublime_points").await.unwrap().is_none());
        storage.write("sublime_points", "50").await.unwrap();
        assert_eq!(storage.read("sublime_points").await.unwrap().as_deref(), Some("50"));
        assert_eq!(storage.keys().await.unwrap(), vec!["sublime_points".to_string()]);

        storage.remove("sublime_points").await.unwrap();
        storage.remove("sublime_points").await.unwrap();
        assert!(storage.read("sublime_points").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap().with_quota(Some(10));

        storage.write("a", "12345").await.unwrap();
        // Rewriting the same key only counts the new size.
        storage.write("a", "1234567").await.unwrap();

        let err = storage.write("b", "12345").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 5, available: 3, .. }));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let err = storage.write("../escape", "1").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
