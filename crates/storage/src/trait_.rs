//! Storage trait abstraction.

use async_trait::async_trait;

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

    /// The store has no room for the value
    #[error("Quota exceeded writing {key}: need {needed} bytes, {available} available")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Bytes the write needs
        needed: u64,
        /// Bytes left in the store
        available: u64,
    },

    /// Key contains characters the backend cannot store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Raw string key/value storage.
///
/// Values are opaque serialized text; typing, expiry and fallback live in
/// [`Persistence`](crate::Persistence).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&mut self, key: &str) -> Result<()>;

    /// All stored keys.
    async fn keys(&self) -> Result<Vec<String>>;
}

pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

pub(crate) fn check_quota(
    key: &str,
    quota: Option<u64>,
    used_by_others: u64,
    needed: u64,
) -> Result<()> {
    if let Some(quota) = quota {
        let available = quota.saturating_sub(used_by_others);
        if needed > available {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                available,
            });
        }
    }
    Ok(())
}
