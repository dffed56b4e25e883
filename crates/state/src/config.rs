//! Application configuration.

use std::path::PathBuf;

use chrono::Duration;
use sublime_progress::PointPolicy;
use sublime_storage::{JsonStorage, Persistence};

/// Configuration for loading, rewarding and persisting state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted slices
    pub data_dir: PathBuf,
    /// Discard persisted slices older than this (None = never expire)
    pub entry_max_age: Option<Duration>,
    /// Byte cap for the on-disk store (None = unbounded)
    pub quota_bytes: Option<u64>,
    /// Point clamping policy
    pub point_policy: PointPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: ".sublime".into(),
            entry_max_age: None,
            quota_bytes: None,
            point_policy: PointPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Open the on-disk store described by this configuration.
    pub async fn open(&self) -> sublime_storage::Result<Persistence<JsonStorage>> {
        let storage = JsonStorage::new(&self.data_dir)
            .await?
            .with_quota(self.quota_bytes);
        Ok(Persistence::new(storage).with_max_age(self.entry_max_age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sublime_storage::StateKey;

    #[tokio::test]
    async fn test_open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("nested"),
            entry_max_age: Some(Duration::days(30)),
            ..AppConfig::default()
        };

        let mut persistence = config.open().await.unwrap();
        assert!(config.data_dir.is_dir());

        persistence.set(StateKey::Points, &42i64).await;
        assert_eq!(persistence.get(StateKey::Points, 0i64).await, 42);
    }
}
