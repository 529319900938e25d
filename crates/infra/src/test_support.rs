//! Backends with scripted timing and failures for cache tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::persistence::{InMemoryKvStore, KeyValueStore, KvError};

/// In-memory backend whose first read returns what was stored `delay`
/// before it completes.
#[derive(Debug)]
pub(crate) struct SlowFirstRead {
    inner: InMemoryKvStore,
    delay: Duration,
    slowed: AtomicBool,
}

impl SlowFirstRead {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryKvStore::new(),
            delay,
            slowed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowFirstRead {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, KvError> {
        let value = self.inner.get_raw(key).await?;
        if !self.slowed.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(self.delay).await;
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), KvError> {
        self.inner.set_raw(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), KvError> {
        self.inner.remove(key).await
    }
}

/// Backend that fails every call.
#[derive(Debug, Default)]
pub(crate) struct Unreachable;

fn unreachable() -> KvError {
    KvError::Backend("backend unreachable".to_string())
}

#[async_trait]
impl KeyValueStore for Unreachable {
    async fn get_raw(&self, _key: &str) -> Result<Option<String>, KvError> {
        Err(unreachable())
    }

    async fn set_raw(&self, _key: &str, _value: String) -> Result<(), KvError> {
        Err(unreachable())
    }

    async fn remove(&self, _key: &str) -> Result<(), KvError> {
        Err(unreachable())
    }
}
