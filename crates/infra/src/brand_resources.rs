//! Competitor and integration operations on a brand.
//!
//! Both lists are embedded in the brand record, so every operation reads the
//! brand, computes the new list and writes back only that field. Operations
//! on one brand run one at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tokio::sync::OwnedMutexGuard;

use brandhub_brands::{Brand, Competitor, CompetitorUpdate, Integration, IntegrationId, NewCompetitor};
use brandhub_core::{BrandId, DataError, DataResult, EntityId, EntityKind, IdGenerator, Patch, Record};

use crate::brand_context::ActiveBrandContext;

/// One async lock per brand id.
#[derive(Debug, Default)]
pub struct BrandLocks {
    locks: Mutex<HashMap<BrandId, Arc<tokio::sync::Mutex<()>>>>,
}

impl BrandLocks {
    /// Wait for exclusive access to `brand`.
    ///
    /// Entries nobody holds or waits on are pruned first, so the map only
    /// grows with the number of brands in use at once.
    pub async fn lock(&self, brand: &BrandId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut entries = self.entries();
            entries.retain(|_, lock| Arc::strong_count(lock) > 1);
            entries.entry(brand.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry for a deleted brand.
    pub fn forget(&self, brand: &BrandId) {
        self.entries().remove(brand);
    }

    /// Number of brands with a lock entry.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<BrandId, Arc<tokio::sync::Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn competitor_ids() -> &'static IdGenerator {
    static IDS: OnceLock<IdGenerator> = OnceLock::new();
    IDS.get_or_init(|| IdGenerator::new("comp"))
}

impl ActiveBrandContext {
    async fn fetch_brand(&self, brand_id: &BrandId) -> DataResult<Record<Brand>> {
        self.repo
            .get_all()
            .await?
            .into_iter()
            .find(|b| b.id == brand_id.as_str())
            .ok_or_else(|| DataError::not_found(Brand::COLLECTION, brand_id.as_str()))
    }

    async fn write_field(
        &self,
        brand_id: &BrandId,
        field: &str,
        value: impl serde::Serialize,
    ) -> DataResult<Arc<Record<Brand>>> {
        let patch = Patch::new().set(field, value)?;
        let record = self.repo.update(&EntityId::from(brand_id), &patch).await?;
        Ok(self.replace_cached(record))
    }

    /// Append a competitor with a generated `comp-…` id.
    pub async fn add_competitor(&self, brand_id: &BrandId, input: NewCompetitor) -> DataResult<Competitor> {
        let _guard = self.locks.lock(brand_id).await;
        let brand = self.fetch_brand(brand_id).await?;

        let competitor = Competitor {
            id: competitor_ids().next_unique(|c| brand.competitor(&EntityId::new(c)).is_some()),
            name: input.name,
            website: input.website,
            analysis: None,
        };

        let mut competitors = brand.data.competitors;
        competitors.push(competitor.clone());
        self.write_field(brand_id, "competitors", &competitors).await?;

        tracing::debug!(%brand_id, competitor_id = %competitor.id, "competitor added");
        Ok(competitor)
    }

    pub async fn update_competitor(
        &self,
        brand_id: &BrandId,
        competitor_id: &EntityId,
        update: &CompetitorUpdate,
    ) -> DataResult<Competitor> {
        let _guard = self.locks.lock(brand_id).await;
        let brand = self.fetch_brand(brand_id).await?;

        let Some(current) = brand.competitor(competitor_id) else {
            return Err(DataError::not_found("competitors", competitor_id.as_str()));
        };
        let updated = update.apply(current);

        let competitors: Vec<Competitor> = brand
            .competitors
            .iter()
            .map(|c| if &c.id == competitor_id { updated.clone() } else { c.clone() })
            .collect();
        self.write_field(brand_id, "competitors", &competitors).await?;

        Ok(updated)
    }

    /// Drop a competitor. Removing one that is not there succeeds.
    pub async fn remove_competitor(&self, brand_id: &BrandId, competitor_id: &EntityId) -> DataResult<()> {
        let _guard = self.locks.lock(brand_id).await;
        let brand = self.fetch_brand(brand_id).await?;

        let competitors: Vec<&Competitor> = brand
            .competitors
            .iter()
            .filter(|c| &c.id != competitor_id)
            .collect();
        self.write_field(brand_id, "competitors", &competitors).await?;
        Ok(())
    }

    /// Set the connection flag of one integration.
    pub async fn update_brand_integration(
        &self,
        brand_id: &BrandId,
        integration_id: IntegrationId,
        connected: bool,
    ) -> DataResult<Integration> {
        let _guard = self.locks.lock(brand_id).await;
        let brand = self.fetch_brand(brand_id).await?;

        let Some(current) = brand.integration(integration_id) else {
            return Err(DataError::not_found("integrations", integration_id.as_str()));
        };
        let updated = Integration {
            connected,
            ..current.clone()
        };

        let integrations: Vec<Integration> = brand
            .integrations
            .iter()
            .map(|i| if i.id == integration_id { updated.clone() } else { i.clone() })
            .collect();
        self.write_field(brand_id, "integrations", &integrations).await?;

        tracing::info!(%brand_id, integration = integration_id.as_str(), connected, "integration updated");
        Ok(updated)
    }
}
