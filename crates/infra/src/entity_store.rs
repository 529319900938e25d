//! In-memory entity caches bound to the active brand.
//!
//! An [`EntityStore`] mirrors one repository. Mutations go to the repository
//! first and are merged into the cache only after they succeed, so the cache
//! never shows a write the store rejected.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;

use brandhub_core::{BrandId, BrandScoped, DataError, DataResult, EntityId, EntityKind, Patch, Record};
use brandhub_events::{ChangeEvent, ChangeFeed, EventBus};

use crate::repository::CollectionRepository;

/// Fetches a load makes before it stops waiting for a quiet cache.
const LOAD_ATTEMPTS: usize = 3;

/// Read side of the active-brand selection.
#[derive(Debug, Clone)]
pub struct BrandSelection {
    rx: watch::Receiver<Option<BrandId>>,
}

impl BrandSelection {
    /// A writable selection channel starting at `initial`.
    pub fn channel(initial: Option<BrandId>) -> (watch::Sender<Option<BrandId>>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }

    /// A selection that never changes.
    pub fn fixed(brand: Option<BrandId>) -> Self {
        Self::channel(brand).1
    }

    pub fn from_receiver(rx: watch::Receiver<Option<BrandId>>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> Option<BrandId> {
        self.rx.borrow().clone()
    }

    /// Wait for the next change. Returns `false` once the writer is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

struct Cache<T> {
    items: Vec<Arc<Record<T>>>,
    revision: u64,
}

/// Counts one in-flight load for as long as it lives.
struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self(count)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

struct ScopedView<T> {
    revision: u64,
    brand: Option<BrandId>,
    items: Arc<Vec<Arc<Record<T>>>>,
}

/// Cached collection with CRUD wrappers and a brand-scoped view.
pub struct EntityStore<T: EntityKind> {
    repo: Arc<CollectionRepository<T>>,
    selection: BrandSelection,
    feed: Arc<ChangeFeed>,
    cache: RwLock<Cache<T>>,
    scoped: Mutex<Option<ScopedView<T>>>,
    loading: AtomicUsize,
}

impl<T: EntityKind> core::fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityStore")
            .field("collection", &T::COLLECTION)
            .field("len", &self.len())
            .field("loading", &self.is_loading())
            .finish()
    }
}

impl<T: EntityKind> EntityStore<T> {
    pub fn new(repo: Arc<CollectionRepository<T>>, selection: BrandSelection, feed: Arc<ChangeFeed>) -> Self {
        Self {
            repo,
            selection,
            feed,
            cache: RwLock::new(Cache {
                items: Vec::new(),
                revision: 0,
            }),
            scoped: Mutex::new(None),
            loading: AtomicUsize::new(0),
        }
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    pub fn repository(&self) -> &Arc<CollectionRepository<T>> {
        &self.repo
    }

    pub fn active_brand(&self) -> Option<BrandId> {
        self.selection.current()
    }

    /// The active brand, or [`DataError::NoActiveBrand`].
    pub fn require_brand(&self) -> DataResult<BrandId> {
        self.active_brand().ok_or(DataError::NoActiveBrand)
    }

    /// True while at least one [`load`](Self::load) is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire) > 0
    }

    /// Bumped on every cache change.
    pub fn revision(&self) -> u64 {
        self.read_cache().revision
    }

    pub fn len(&self) -> usize {
        self.read_cache().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The full, unscoped collection, newest first.
    pub fn items(&self) -> Vec<Arc<Record<T>>> {
        self.read_cache().items.clone()
    }

    pub fn get(&self, id: &EntityId) -> Option<Arc<Record<T>>> {
        self.read_cache().items.iter().find(|r| &r.id == id).cloned()
    }

    /// Fetch the whole collection into the cache.
    ///
    /// On failure the error is logged and returned and the cache keeps its
    /// previous contents. A snapshot is only applied if the cache did not
    /// change while it was being fetched; otherwise the fetch is repeated,
    /// and after the last attempt cached records missing from the snapshot
    /// are kept at its head.
    pub async fn load(&self) -> DataResult<()> {
        let _loading = Loading::enter(&self.loading);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let seen = self.revision();
            let records = match self.repo.get_all().await {
                Ok(records) => records,
                Err(err) => {
                    tracing::error!(collection = T::COLLECTION, error = %err, "failed to load collection");
                    return Err(err);
                }
            };

            let loaded = {
                let mut cache = self.write_cache();
                let quiet = cache.revision == seen;
                if quiet || attempt >= LOAD_ATTEMPTS {
                    let mut items: Vec<Arc<Record<T>>> = records.into_iter().map(Arc::new).collect();
                    if !quiet {
                        let missing: Vec<_> = cache
                            .items
                            .iter()
                            .filter(|cached| !items.iter().any(|r| r.id == cached.id))
                            .cloned()
                            .collect();
                        items.splice(0..0, missing);
                    }
                    cache.items = items;
                    cache.revision += 1;
                    Some(cache.items.len())
                } else {
                    None
                }
            };

            if let Some(count) = loaded {
                self.publish(ChangeEvent::loaded(T::COLLECTION, count));
                return Ok(());
            }
            tracing::debug!(collection = T::COLLECTION, attempt, "cache changed during load; fetching again");
        }
    }

    pub async fn add(&self, data: T) -> DataResult<Arc<Record<T>>> {
        let record = Arc::new(self.repo.add(data).await?);
        self.mutate(|items| {
            items.retain(|r| r.id != record.id);
            items.insert(0, record.clone());
        });
        self.publish(ChangeEvent::added(T::COLLECTION, &record.id));
        Ok(record)
    }

    /// Patch record `id`. Only the matching cache entry is replaced.
    pub async fn update(&self, id: &EntityId, patch: &Patch) -> DataResult<Arc<Record<T>>> {
        let record = Arc::new(self.repo.update(id, patch).await?);
        self.mutate(|items| {
            if let Some(slot) = items.iter_mut().find(|r| &r.id == id) {
                *slot = record.clone();
            }
        });
        self.publish(ChangeEvent::updated(T::COLLECTION, id));
        Ok(record)
    }

    pub async fn remove(&self, id: &EntityId) -> DataResult<()> {
        self.repo.remove(id).await?;

        let removed = {
            let mut cache = self.write_cache();
            let before = cache.items.len();
            cache.items.retain(|r| &r.id != id);
            let removed = cache.items.len() != before;
            if removed {
                cache.revision += 1;
            }
            removed
        };

        if removed {
            self.publish(ChangeEvent::removed(T::COLLECTION, id));
        }
        Ok(())
    }

    fn mutate(&self, change: impl FnOnce(&mut Vec<Arc<Record<T>>>)) {
        let mut cache = self.write_cache();
        change(&mut cache.items);
        cache.revision += 1;
    }

    fn publish(&self, event: ChangeEvent) {
        if let Err(err) = self.feed.publish(event) {
            tracing::warn!(collection = T::COLLECTION, error = ?err, "change event dropped");
        }
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, Cache<T>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, Cache<T>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: EntityKind + BrandScoped> EntityStore<T> {
    /// Cached records belonging to the active brand; empty with no brand.
    ///
    /// Recomputed only when the cache or the active brand changed since the
    /// last call.
    pub fn scoped(&self) -> Arc<Vec<Arc<Record<T>>>> {
        let brand = self.active_brand();
        let cache = self.read_cache();
        let mut memo = self.scoped.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(view) = memo.as_ref() {
            if view.revision == cache.revision && view.brand == brand {
                return view.items.clone();
            }
        }

        let items: Arc<Vec<Arc<Record<T>>>> = Arc::new(match &brand {
            Some(brand) => cache.items.iter().filter(|r| r.belongs_to(brand)).cloned().collect(),
            None => Vec::new(),
        });

        *memo = Some(ScopedView {
            revision: cache.revision,
            brand,
            items: items.clone(),
        });
        items
    }

    /// Scoped records matching `predicate`.
    pub fn scoped_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<Arc<Record<T>>> {
        self.scoped().iter().filter(|r| predicate(&r.data)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use crate::persistence::{KeyValueStore, PersistentStore};
    use crate::repository::RepositoryOptions;
    use crate::test_support::{SlowFirstRead, Unreachable};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Post {
        brand_id: BrandId,
        title: String,
    }

    impl EntityKind for Post {
        const COLLECTION: &'static str = "db_posts";
    }

    impl BrandScoped for Post {
        fn belongs_to(&self, brand: &BrandId) -> bool {
            &self.brand_id == brand
        }
    }

    fn post(brand: &str, title: &str) -> Post {
        Post {
            brand_id: BrandId::new(brand),
            title: title.to_string(),
        }
    }

    fn store_with(seed: Vec<Record<Post>>) -> (watch::Sender<Option<BrandId>>, EntityStore<Post>, Arc<ChangeFeed>) {
        let repo = Arc::new(CollectionRepository::new(
            PersistentStore::in_memory(),
            seed,
            RepositoryOptions::immediate(),
        ));
        let (tx, selection) = BrandSelection::channel(Some(BrandId::new("brand-1")));
        let feed = Arc::new(ChangeFeed::new());
        (tx, EntityStore::new(repo, selection, feed.clone()), feed)
    }

    fn store_over(backend: impl KeyValueStore + 'static, options: RepositoryOptions) -> Arc<EntityStore<Post>> {
        let seed = vec![Record::new("p-1", post("brand-1", "one"))];
        let repo = Arc::new(CollectionRepository::new(PersistentStore::new(backend), seed, options));
        let selection = BrandSelection::fixed(Some(BrandId::new("brand-1")));
        Arc::new(EntityStore::new(repo, selection, Arc::new(ChangeFeed::new())))
    }

    fn spawn_load(store: &Arc<EntityStore<Post>>) -> tokio::task::JoinHandle<DataResult<()>> {
        let store = store.clone();
        tokio::spawn(async move { store.load().await })
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_spans_a_successful_load() {
        let store = store_over(crate::InMemoryKvStore::new(), RepositoryOptions::default());
        assert!(!store.is_loading());

        let load = spawn_load(&store);
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        load.await.unwrap().unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_clears_after_a_failed_load() {
        let store = store_over(Unreachable, RepositoryOptions::default());

        let load = spawn_load(&store);
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        let err = load.await.unwrap().unwrap_err();
        assert!(matches!(err, DataError::Storage(_)));
        assert!(!store.is_loading());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_clears_when_the_load_is_dropped() {
        let store = store_over(crate::InMemoryKvStore::new(), RepositoryOptions::default());

        let timed_out = tokio::time::timeout(Duration::from_millis(10), store.load()).await;
        assert!(timed_out.is_err());
        assert!(!store.is_loading());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn add_during_a_slow_load_is_kept() {
        let store = store_over(SlowFirstRead::new(Duration::from_millis(100)), RepositoryOptions::immediate());

        let load = spawn_load(&store);
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        let added = store.add(post("brand-1", "two")).await.unwrap();
        load.await.unwrap().unwrap();

        assert!(store.get(&added.id).is_some());
        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].id, added.id);
    }

    #[tokio::test]
    async fn scoped_view_follows_active_brand() {
        let (tx, store, _feed) = store_with(vec![
            Record::new("p-1", post("brand-1", "one")),
            Record::new("p-2", post("brand-2", "two")),
        ]);
        store.load().await.unwrap();

        assert_eq!(store.scoped().len(), 1);
        assert_eq!(store.scoped()[0].title, "one");

        tx.send_replace(Some(BrandId::new("brand-3")));
        assert!(store.scoped().is_empty());
        assert_eq!(store.items().len(), 2);

        tx.send_replace(None);
        assert!(store.scoped().is_empty());
    }

    #[tokio::test]
    async fn scoped_view_is_memoized_until_something_changes() {
        let (_tx, store, _feed) = store_with(vec![Record::new("p-1", post("brand-1", "one"))]);
        store.load().await.unwrap();

        let first = store.scoped();
        assert!(Arc::ptr_eq(&first, &store.scoped()));

        store.add(post("brand-1", "two")).await.unwrap();
        let second = store.scoped();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].title, "two");
    }

    #[tokio::test]
    async fn update_replaces_only_the_target() {
        let (_tx, store, _feed) = store_with(vec![
            Record::new("p-1", post("brand-1", "one")),
            Record::new("p-2", post("brand-1", "two")),
        ]);
        store.load().await.unwrap();
        let before = store.items();

        let patch = Patch::new().set("title", "uno").unwrap();
        store.update(&EntityId::new("p-1"), &patch).await.unwrap();

        let after = store.items();
        assert_eq!(after[0].title, "uno");
        assert!(!Arc::ptr_eq(&before[0], &after[0]));
        assert!(Arc::ptr_eq(&before[1], &after[1]));
    }

    #[tokio::test]
    async fn failed_update_leaves_cache_untouched() {
        let (_tx, store, _feed) = store_with(vec![Record::new("p-1", post("brand-1", "one"))]);
        store.load().await.unwrap();
        let revision = store.revision();

        let patch = Patch::new().set("title", "x").unwrap();
        let err = store.update(&EntityId::new("missing"), &patch).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.revision(), revision);
    }

    #[tokio::test]
    async fn mutations_publish_changes() {
        let (_tx, store, feed) = store_with(vec![]);
        let mut changes = feed.subscribe();

        store.load().await.unwrap();
        let record = store.add(post("brand-1", "one")).await.unwrap();
        store.remove(&record.id).await.unwrap();
        store.remove(&record.id).await.unwrap();

        let events = changes.drain();
        assert_eq!(
            events,
            vec![
                ChangeEvent::loaded("db_posts", 0),
                ChangeEvent::added("db_posts", &record.id),
                ChangeEvent::removed("db_posts", &record.id),
            ]
        );
    }

    #[tokio::test]
    async fn require_brand_without_selection() {
        let (tx, store, _feed) = store_with(vec![]);
        tx.send_replace(None);
        assert_eq!(store.require_brand(), Err(DataError::NoActiveBrand));
    }
}
