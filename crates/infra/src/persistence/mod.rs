//! Key/value persistence for collections.
//!
//! Every collection lives under one key as a JSON array. Backends only move
//! strings around; typing and the read/write contracts live in
//! [`PersistentStore`].

pub mod file;
pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileKvStore;
pub use in_memory::InMemoryKvStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteKvStore;
pub use store::{Loaded, PersistentStore};

/// Backend failure.
#[derive(Debug, Error)]
pub enum KvError {
    /// The key cannot be stored by this backend.
    #[error("invalid key '{0}'")]
    InvalidKey(String),

    /// The backend failed a read or write.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl From<anyhow::Error> for KvError {
    fn from(err: anyhow::Error) -> Self {
        Self::Backend(format!("{err:#}"))
    }
}

impl From<KvError> for brandhub_core::DataError {
    fn from(err: KvError) -> Self {
        brandhub_core::DataError::storage(err.to_string())
    }
}

/// String key/value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KvError>;

    async fn set_raw(&self, key: &str, value: String) -> Result<(), KvError>;

    /// Deleting an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), KvError>;

    async fn contains(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get_raw(key).await?.is_some())
    }
}

#[async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), KvError> {
        (**self).set_raw(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key).await
    }

    async fn contains(&self, key: &str) -> Result<bool, KvError> {
        (**self).contains(key).await
    }
}
