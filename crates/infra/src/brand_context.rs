//! The brand list and the active-brand selection.
//!
//! [`ActiveBrandContext`] owns the write side of the selection channel that
//! every entity store reads for its scoped view.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;

use brandhub_brands::{Brand, seed};
use brandhub_core::{BrandId, DataError, DataResult, EntityId, EntityKind, Patch, Record};
use brandhub_events::{ChangeEvent, ChangeFeed, EventBus};

use crate::brand_resources::BrandLocks;
use crate::entity_store::BrandSelection;
use crate::repository::CollectionRepository;

/// Load state of the brand list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandPhase {
    Uninitialized,
    Loading,
    Ready,
}

/// Fetches a load makes before it stops waiting for a quiet brand list.
const LOAD_ATTEMPTS: usize = 3;

struct BrandState {
    /// Phase once no load is in flight.
    settled: BrandPhase,
    loads: usize,
    brands: Vec<Arc<Record<Brand>>>,
    /// Bumped on every change to `brands`.
    revision: u64,
}

impl BrandState {
    fn phase(&self) -> BrandPhase {
        if self.loads > 0 { BrandPhase::Loading } else { self.settled }
    }

    fn set_brands(&mut self, brands: Vec<Arc<Record<Brand>>>) {
        self.brands = brands;
        self.revision += 1;
    }
}

/// Holds the context in [`BrandPhase::Loading`] for as long as it lives.
struct LoadGuard<'a> {
    ctx: &'a ActiveBrandContext,
}

impl<'a> LoadGuard<'a> {
    fn enter(ctx: &'a ActiveBrandContext) -> Self {
        ctx.write_state().loads += 1;
        Self { ctx }
    }

    fn settle(&self, phase: BrandPhase) {
        self.ctx.write_state().settled = phase;
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.ctx.write_state();
        state.loads = state.loads.saturating_sub(1);
    }
}

pub struct ActiveBrandContext {
    pub(crate) repo: Arc<CollectionRepository<Brand>>,
    feed: Arc<ChangeFeed>,
    state: RwLock<BrandState>,
    selected: watch::Sender<Option<BrandId>>,
    pub(crate) locks: BrandLocks,
}

impl core::fmt::Debug for ActiveBrandContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActiveBrandContext")
            .field("phase", &self.phase())
            .field("selected", &self.selected_id())
            .finish_non_exhaustive()
    }
}

impl ActiveBrandContext {
    pub fn new(repo: Arc<CollectionRepository<Brand>>, feed: Arc<ChangeFeed>) -> Self {
        let (selected, _) = watch::channel(None);
        Self {
            repo,
            feed,
            state: RwLock::new(BrandState {
                settled: BrandPhase::Uninitialized,
                loads: 0,
                brands: Vec::new(),
                revision: 0,
            }),
            selected,
            locks: BrandLocks::default(),
        }
    }

    /// A new reader of the active-brand selection.
    pub fn selection(&self) -> BrandSelection {
        BrandSelection::from_receiver(self.selected.subscribe())
    }

    pub fn phase(&self) -> BrandPhase {
        self.read_state().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == BrandPhase::Loading
    }

    /// All brands, newest first.
    pub fn brands(&self) -> Vec<Arc<Record<Brand>>> {
        self.read_state().brands.clone()
    }

    pub fn brand(&self, id: &BrandId) -> Option<Arc<Record<Brand>>> {
        self.read_state()
            .brands
            .iter()
            .find(|b| b.id == id.as_str())
            .cloned()
    }

    pub fn selected_id(&self) -> Option<BrandId> {
        self.selected.borrow().clone()
    }

    /// The selected brand as it is in the list right now.
    pub fn current_brand(&self) -> Option<Arc<Record<Brand>>> {
        self.selected_id().and_then(|id| self.brand(&id))
    }

    /// Fetch the brand list and select its first brand.
    ///
    /// The phase reads [`BrandPhase::Loading`] until the load finishes or is
    /// dropped. A dropped load leaves the previous phase in place; a failed
    /// one leaves [`BrandPhase::Uninitialized`]. Brands added while the list
    /// was in flight are never lost: the fetch is repeated, and after the
    /// last attempt cached brands missing from the snapshot are kept.
    pub async fn load(&self) -> DataResult<()> {
        let guard = LoadGuard::enter(self);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let seen = self.read_state().revision;
            let records = match self.repo.get_all().await {
                Ok(records) => records,
                Err(err) => {
                    guard.settle(BrandPhase::Uninitialized);
                    tracing::error!(error = %err, "failed to load brands");
                    return Err(err);
                }
            };

            let loaded = {
                let mut state = self.write_state();
                let quiet = state.revision == seen;
                if quiet || attempt >= LOAD_ATTEMPTS {
                    let mut brands: Vec<Arc<Record<Brand>>> = records.into_iter().map(Arc::new).collect();
                    if !quiet {
                        let missing: Vec<_> = state
                            .brands
                            .iter()
                            .filter(|cached| !brands.iter().any(|b| b.id == cached.id))
                            .cloned()
                            .collect();
                        brands.splice(0..0, missing);
                    }
                    state.set_brands(brands);
                    state.settled = BrandPhase::Ready;
                    Some(state.brands.len())
                } else {
                    None
                }
            };

            if let Some(count) = loaded {
                drop(guard);
                self.publish(ChangeEvent::loaded(Brand::COLLECTION, count));
                self.reselect();
                return Ok(());
            }
            tracing::debug!(attempt, "brand list changed during load; fetching again");
        }
    }

    /// Make `id` the active brand.
    pub fn select(&self, id: &BrandId) -> DataResult<Arc<Record<Brand>>> {
        let mut found = None;
        let changed = self.selected.send_if_modified(|current| {
            found = self.brand(id);
            if found.is_none() || current.as_ref() == Some(id) {
                return false;
            }
            *current = Some(id.clone());
            true
        });

        let brand = found.ok_or_else(|| DataError::not_found(Brand::COLLECTION, id.as_str()))?;
        if changed {
            self.announce(Some(id.clone()));
        }
        Ok(brand)
    }

    pub fn clear_selection(&self) {
        self.set_selection(None);
    }

    /// Create a brand from the built-in template.
    pub async fn add_brand(&self, name: impl Into<String>) -> DataResult<Arc<Record<Brand>>> {
        let record = Arc::new(self.repo.add(seed::template(name)).await?);
        {
            let mut state = self.write_state();
            state.brands.retain(|b| b.id != record.id);
            state.brands.insert(0, record.clone());
            state.revision += 1;
        }
        self.publish(ChangeEvent::added(Brand::COLLECTION, &record.id));
        self.reselect();
        Ok(record)
    }

    /// Patch profile fields. Patches touching competitors or integrations
    /// are rejected; those change only through the sub-resource operations.
    pub async fn update_brand_profile(&self, id: &BrandId, patch: &Patch) -> DataResult<Arc<Record<Brand>>> {
        if let Some(field) = Brand::EMBEDDED_FIELDS.iter().find(|f| patch.touches(f)) {
            return Err(DataError::validation(format!(
                "{field} cannot be changed through a profile update"
            )));
        }

        let record = self.repo.update(&EntityId::from(id), patch).await?;
        Ok(self.replace_cached(record))
    }

    /// Delete a brand. Records that reference it are left in place.
    pub async fn delete_brand(&self, id: &BrandId) -> DataResult<()> {
        let record_id = EntityId::from(id);
        {
            let _brand = self.locks.lock(id).await;
            self.repo.remove(&record_id).await?;
            self.locks.forget(id);
        }

        let removed = {
            let mut state = self.write_state();
            let before = state.brands.len();
            state.brands.retain(|b| b.id != record_id);
            let removed = state.brands.len() != before;
            if removed {
                state.revision += 1;
            }
            removed
        };
        if removed {
            self.publish(ChangeEvent::removed(Brand::COLLECTION, &record_id));
        }
        self.reselect();
        Ok(())
    }

    /// Swap the cached copy of `record` and re-resolve the selection.
    pub(crate) fn replace_cached(&self, record: Record<Brand>) -> Arc<Record<Brand>> {
        let record = Arc::new(record);
        {
            let mut state = self.write_state();
            if let Some(slot) = state.brands.iter_mut().find(|b| b.id == record.id) {
                *slot = record.clone();
                state.revision += 1;
            }
        }
        self.publish(ChangeEvent::updated(Brand::COLLECTION, &record.id));
        self.reselect();
        record
    }

    /// Keep the selection if it still exists, else fall back to the first
    /// brand, else to none. The check and the write happen under the
    /// selection lock, so a concurrent [`select`](Self::select) is never
    /// reverted.
    fn reselect(&self) {
        let mut next = None;
        let changed = self.selected.send_if_modified(|current| {
            let state = self.read_state();
            if let Some(id) = current.as_ref() {
                if state.brands.iter().any(|b| b.id == id.as_str()) {
                    return false;
                }
            }

            next = state.brands.first().map(|b| BrandId::from(&b.id));
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });

        if changed {
            self.announce(next);
        }
    }

    fn set_selection(&self, next: Option<BrandId>) {
        let changed = self.selected.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });

        if changed {
            self.announce(next);
        }
    }

    fn announce(&self, brand_id: Option<BrandId>) {
        tracing::info!(?brand_id, "active brand changed");
        self.publish(ChangeEvent::BrandSelected { brand_id });
    }

    pub(crate) fn publish(&self, event: ChangeEvent) {
        if let Err(err) = self.feed.publish(event) {
            tracing::warn!(error = ?err, "change event dropped");
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, BrandState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, BrandState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
