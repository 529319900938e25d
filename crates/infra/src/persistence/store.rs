use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use brandhub_core::{DataError, DataResult};

use super::{InMemoryKvStore, KeyValueStore};

/// Outcome of a typed read.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// Nothing is stored under the key.
    Absent,
    Present(T),
    /// Something is stored but does not decode.
    Corrupt(String),
}

impl<T> Loaded<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Corrupt(_) => None,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// Typed access to a key/value backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl core::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PersistentStore").finish_non_exhaustive()
    }
}

impl PersistentStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A store over a fresh [`InMemoryKvStore`].
    pub fn in_memory() -> Self {
        Self::new(InMemoryKvStore::new())
    }

    /// Value under `key`, or `default` when absent, unreadable or undecodable.
    ///
    /// Failures are logged, never returned.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.load(key).await {
            Ok(Loaded::Present(value)) => value,
            Ok(Loaded::Absent) => default,
            Ok(Loaded::Corrupt(reason)) => {
                tracing::error!(key, %reason, "stored value does not decode");
                default
            }
            Err(err) => {
                tracing::error!(key, error = %err, "failed to read stored value");
                default
            }
        }
    }

    /// Tagged read distinguishing an absent key from a corrupt value.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> DataResult<Loaded<T>> {
        let Some(raw) = self.backend.get_raw(key).await? else {
            return Ok(Loaded::Absent);
        };

        Ok(match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Present(value),
            Err(err) => Loaded::Corrupt(err.to_string()),
        })
    }

    /// Write `value` under `key`, propagating failures.
    pub async fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DataResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key, raw).await.map_err(DataError::from)
    }

    /// Write `value` under `key`. Failures are logged, never returned.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_set(key, value).await {
            tracing::error!(key, error = %err, "failed to write stored value");
        }
    }

    pub async fn contains(&self, key: &str) -> DataResult<bool> {
        Ok(self.backend.contains(key).await?)
    }

    pub async fn remove(&self, key: &str) -> DataResult<()> {
        Ok(self.backend.remove(key).await?)
    }
}
