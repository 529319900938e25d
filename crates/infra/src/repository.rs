//! Generic collection repository over the persistent store.
//!
//! One repository per entity kind. Each call waits out the configured
//! latency, then reads the whole collection, applies its change and writes
//! the whole collection back.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use brandhub_core::{DataError, DataResult, EntityId, EntityKind, IdGenerator, Patch, Record};

use crate::persistence::{Loaded, PersistentStore};

/// Artificial delay applied before every repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency(Duration);

impl Latency {
    pub const DEFAULT: Latency = Latency(Duration::from_millis(500));

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a read does when the stored collection does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Serve the seed data (and overwrite the corrupt value on the next write).
    #[default]
    Reseed,
    /// Fail with [`DataError::Serialization`].
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub latency: Latency,
    pub on_corrupt: CorruptionPolicy,
}

impl RepositoryOptions {
    /// No latency, reseed on corruption.
    pub fn immediate() -> Self {
        Self {
            latency: Latency::none(),
            on_corrupt: CorruptionPolicy::Reseed,
        }
    }
}

/// CRUD over one collection key.
#[derive(Debug)]
pub struct CollectionRepository<T: EntityKind> {
    store: PersistentStore,
    seed: Vec<Record<T>>,
    options: RepositoryOptions,
    ids: IdGenerator,
    writes: Mutex<()>,
}

impl<T: EntityKind> CollectionRepository<T> {
    pub fn new(store: PersistentStore, seed: Vec<Record<T>>, options: RepositoryOptions) -> Self {
        Self {
            store,
            seed,
            options,
            ids: IdGenerator::new(T::COLLECTION),
            writes: Mutex::new(()),
        }
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    pub fn options(&self) -> RepositoryOptions {
        self.options
    }

    async fn read(&self) -> DataResult<Vec<Record<T>>> {
        match self.store.load::<Vec<Record<T>>>(T::COLLECTION).await? {
            Loaded::Present(items) => Ok(items),
            Loaded::Absent => Ok(self.seed.clone()),
            Loaded::Corrupt(reason) => match self.options.on_corrupt {
                CorruptionPolicy::Reseed => {
                    tracing::warn!(collection = T::COLLECTION, %reason, "stored collection is corrupt; serving seed data");
                    Ok(self.seed.clone())
                }
                CorruptionPolicy::Fail => Err(DataError::serialization(format!(
                    "{}: {reason}",
                    T::COLLECTION
                ))),
            },
        }
    }

    async fn write(&self, items: &[Record<T>]) -> DataResult<()> {
        self.store.try_set(T::COLLECTION, items).await
    }

    /// The whole collection, newest first.
    pub async fn get_all(&self) -> DataResult<Vec<Record<T>>> {
        self.options.latency.wait().await;
        self.read().await
    }

    pub async fn get(&self, id: &EntityId) -> DataResult<Option<Record<T>>> {
        self.options.latency.wait().await;
        Ok(self.read().await?.into_iter().find(|r| &r.id == id))
    }

    /// Store `data` as a new record at the head of the collection.
    pub async fn add(&self, data: T) -> DataResult<Record<T>> {
        self.options.latency.wait().await;
        let _write = self.writes.lock().await;

        let mut items = self.read().await?;
        let id = self
            .ids
            .next_unique(|candidate| items.iter().any(|r| r.id == candidate));

        let mut record = Record::new(id, data);
        if T::STAMPS_CREATION {
            record = record.with_created_at(Utc::now());
        }

        items.insert(0, record.clone());
        self.write(&items).await?;

        tracing::debug!(collection = T::COLLECTION, id = %record.id, "record added");
        Ok(record)
    }

    /// Shallow-merge `patch` into record `id`.
    pub async fn update(&self, id: &EntityId, patch: &Patch) -> DataResult<Record<T>> {
        self.options.latency.wait().await;
        let _write = self.writes.lock().await;

        let mut items = self.read().await?;
        let Some(slot) = items.iter_mut().find(|r| &r.id == id) else {
            return Err(DataError::not_found(T::COLLECTION, id.as_str()));
        };

        let updated = patch.apply(slot)?;
        *slot = updated.clone();
        self.write(&items).await?;

        tracing::debug!(collection = T::COLLECTION, %id, fields = ?patch.fields().collect::<Vec<_>>(), "record updated");
        Ok(updated)
    }

    /// Delete record `id`. Deleting an absent id succeeds.
    pub async fn remove(&self, id: &EntityId) -> DataResult<()> {
        self.options.latency.wait().await;
        let _write = self.writes.lock().await;

        let mut items = self.read().await?;
        let before = items.len();
        items.retain(|r| &r.id != id);
        self.write(&items).await?;

        tracing::debug!(collection = T::COLLECTION, %id, removed = before != items.len(), "record removed");
        Ok(())
    }
}
