//! Typed persistence over a raw [`Storage`].
//!
//! Reads and writes never fail their caller:
//! - unreadable, corrupted or expired entries are discarded and the default returned;
//! - a write the primary store rejects (for example over quota) lands in an
//!   in-memory fallback, which shadows the primary until a later write succeeds.
//!
//! With a max age configured, values are wrapped in a `{value, timestamp}`
//! envelope (timestamp in epoch milliseconds).

use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::keys::StateKey;
use crate::memory::MemoryStorage;
use crate::trait_::Storage;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    value: &'a T,
    timestamp: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    value: serde_json::Value,
    timestamp: i64,
}

enum Decoded<T> {
    Fresh(T),
    Expired,
    Corrupted(String),
}

/// Never-failing typed persistence with expiry and quota fallback.
pub struct Persistence<S: Storage> {
    primary: S,
    fallback: MemoryStorage,
    max_age: Option<Duration>,
}

impl<S: Storage> Persistence<S> {
    /// Wrap a primary store.
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: MemoryStorage::new(),
            max_age: None,
        }
    }

    /// Expire entries older than `max_age`. `None` stores bare values.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// The primary store.
    pub fn primary(&self) -> &S {
        &self.primary
    }

    /// Whether `key` currently lives only in the fallback store.
    pub fn is_in_fallback(&self, key: StateKey) -> bool {
        self.fallback.contains(key.as_str())
    }

    /// Read `key`, or `default` if it is missing, corrupted or expired.
    pub async fn get<T: DeserializeOwned>(&mut self, key: StateKey, default: T) -> T {
        let name = key.as_str();

        let raw = match self.fallback.read(name).await {
            Ok(Some(raw)) => Some((raw, true)),
            _ => match self.primary.read(name).await {
                Ok(found) => found.map(|raw| (raw, false)),
                Err(e) => {
                    warn!("Failed to read {}: {}", name, e);
                    None
                }
            },
        };

        let Some((raw, from_fallback)) = raw else {
            return default;
        };

        match self.decode(&raw) {
            Decoded::Fresh(value) => value,
            Decoded::Expired => {
                debug!("Discarding expired {}", name);
                self.discard(name, from_fallback).await;
                default
            }
            Decoded::Corrupted(reason) => {
                warn!("Discarding corrupted {}: {}", name, reason);
                self.discard(name, from_fallback).await;
                default
            }
        }
    }

    /// Write `value` under `key`, falling back to memory if the primary refuses.
    pub async fn set<T: Serialize>(&mut self, key: StateKey, value: &T) {
        let name = key.as_str();
        let encoded = match self.encode(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to serialize {}: {}", name, e);
                return;
            }
        };

        match self.primary.write(name, &encoded).await {
            Ok(()) => {
                if self.fallback.contains(name) {
                    let _ = self.fallback.remove(name).await;
                }
            }
            Err(e) => {
                warn!("Failed to persist {} ({}); keeping it in memory", name, e);
                if let Err(e) = self.fallback.write(name, &encoded).await {
                    warn!("Fallback store rejected {}: {}", name, e);
                }
            }
        }
    }

    fn encode<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        match self.max_age {
            Some(_) => serde_json::to_string(&EnvelopeRef {
                value,
                timestamp: Utc::now().timestamp_millis(),
            }),
            None => serde_json::to_string(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Decoded<T> {
        let json: serde_json::Value = match serde_json::from_str(raw) {
            Ok(json) => json,
            Err(e) => return Decoded::Corrupted(e.to_string()),
        };

        // Accept both shapes so toggling expiry does not wipe existing data.
        let (value, timestamp) = match serde_json::from_value::<Envelope>(json.clone()) {
            Ok(envelope) => (envelope.value, Some(envelope.timestamp)),
            Err(_) => (json, None),
        };

        if let (Some(max_age), Some(timestamp)) = (self.max_age, timestamp) {
            let age = Utc::now().timestamp_millis().saturating_sub(timestamp);
            if age > max_age.num_milliseconds() {
                return Decoded::Expired;
            }
        }

        match serde_json::from_value(value) {
            Ok(value) => Decoded::Fresh(value),
            Err(e) => Decoded::Corrupted(e.to_string()),
        }
    }

    async fn discard(&mut self, name: &str, from_fallback: bool) {
        let result = if from_fallback {
            self.fallback.remove(name).await
        } else {
            self.primary.remove(name).await
        };
        if let Err(e) = result {
            warn!("Failed to remove {}: {}", name, e);
        }
    }
}
