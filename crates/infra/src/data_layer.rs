//! Wiring: one store, one brand context, one entity store per collection.

use std::sync::Arc;

use chrono::Utc;

use brandhub_clients::{Client, User};
use brandhub_core::{DataResult, EntityId, EntityKind, Patch, Record};
use brandhub_events::{ChangeEvent, ChangeFeed, EventBus, Subscription};
use brandhub_financials::{Budget, Expense, Invoice};
use brandhub_marketing::{
    Asset, AssetCollection, AutomationWorkflow, Campaign, ContentCalendarEvent, Goal, Influencer,
};
use brandhub_projects::{Project, Task};

use crate::brand_context::ActiveBrandContext;
use crate::config::{DataConfig, StoreBackend};
use crate::entity_store::EntityStore;
use crate::persistence::{FileKvStore, PersistentStore};
use crate::repository::{CollectionRepository, RepositoryOptions};
use crate::seeding::{Fixtures, seed_if_empty};

/// Every provider of the application, sharing one store and one change feed.
#[derive(Debug)]
pub struct DataLayer {
    store: PersistentStore,
    feed: Arc<ChangeFeed>,
    pub brands: Arc<ActiveBrandContext>,
    pub campaigns: Arc<EntityStore<Campaign>>,
    pub assets: Arc<EntityStore<Asset>>,
    pub collections: Arc<EntityStore<AssetCollection>>,
    pub calendar: Arc<EntityStore<ContentCalendarEvent>>,
    pub influencers: Arc<EntityStore<Influencer>>,
    pub automations: Arc<EntityStore<AutomationWorkflow>>,
    pub goals: Arc<EntityStore<Goal>>,
    pub projects: Arc<EntityStore<Project>>,
    pub tasks: Arc<EntityStore<Task>>,
    pub budgets: Arc<EntityStore<Budget>>,
    pub expenses: Arc<EntityStore<Expense>>,
    pub invoices: Arc<EntityStore<Invoice>>,
    pub clients: Arc<EntityStore<Client>>,
    pub users: Arc<EntityStore<User>>,
}

struct Wiring<'a> {
    store: &'a PersistentStore,
    options: RepositoryOptions,
    brands: &'a ActiveBrandContext,
    feed: &'a Arc<ChangeFeed>,
}

impl Wiring<'_> {
    fn entity_store<T: EntityKind>(&self, seed: Vec<Record<T>>) -> Arc<EntityStore<T>> {
        let repo = CollectionRepository::new(self.store.clone(), seed, self.options);
        Arc::new(EntityStore::new(
            Arc::new(repo),
            self.brands.selection(),
            self.feed.clone(),
        ))
    }
}

async fn open_store(backend: &StoreBackend) -> DataResult<PersistentStore> {
    match backend {
        StoreBackend::Memory => Ok(PersistentStore::in_memory()),
        StoreBackend::File(dir) => Ok(PersistentStore::new(FileKvStore::new(dir.clone()))),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite(url) => {
            let backend = crate::persistence::SqliteKvStore::connect(url).await?;
            Ok(PersistentStore::new(backend))
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite(url) => Err(brandhub_core::DataError::storage(format!(
            "sqlite backend requested ({url}) but brandhub-infra was built without the `sqlite` feature"
        ))),
    }
}

impl DataLayer {
    /// Open the configured backend, seed it if new and wire every store.
    pub async fn open(config: &DataConfig) -> DataResult<Self> {
        let store = open_store(&config.backend).await?;
        tracing::info!(backend = ?config.backend, "data layer opened");
        Self::with_store(store, config.repository_options()).await
    }

    pub async fn with_store(store: PersistentStore, options: RepositoryOptions) -> DataResult<Self> {
        let fixtures = Fixtures::at(Utc::now());
        seed_if_empty(&store, &fixtures).await?;

        let feed = Arc::new(ChangeFeed::new());
        let brand_repo = CollectionRepository::new(store.clone(), fixtures.brands, options);
        let brands = Arc::new(ActiveBrandContext::new(Arc::new(brand_repo), feed.clone()));

        let wiring = Wiring {
            store: &store,
            options,
            brands: &brands,
            feed: &feed,
        };

        let campaigns = wiring.entity_store(fixtures.campaigns);
        let assets = wiring.entity_store(fixtures.assets);
        let collections = wiring.entity_store(fixtures.collections);
        let calendar = wiring.entity_store(fixtures.calendar);
        let influencers = wiring.entity_store(fixtures.influencers);
        let automations = wiring.entity_store(fixtures.automations);
        let goals = wiring.entity_store(fixtures.goals);
        let projects = wiring.entity_store(fixtures.projects);
        let tasks = wiring.entity_store(fixtures.tasks);
        let budgets = wiring.entity_store(fixtures.budgets);
        let expenses = wiring.entity_store(fixtures.expenses);
        let invoices = wiring.entity_store(fixtures.invoices);
        let clients = wiring.entity_store(fixtures.clients);
        let users = wiring.entity_store(fixtures.users);

        Ok(Self {
            store,
            feed,
            brands,
            campaigns,
            assets,
            collections,
            calendar,
            influencers,
            automations,
            goals,
            projects,
            tasks,
            budgets,
            expenses,
            invoices,
            clients,
            users,
        })
    }

    /// Brands first so the selection is in place, then every collection
    /// concurrently.
    pub async fn load_all(&self) -> DataResult<()> {
        self.brands.load().await?;
        tokio::try_join!(
            self.campaigns.load(),
            self.assets.load(),
            self.collections.load(),
            self.calendar.load(),
            self.influencers.load(),
            self.automations.load(),
            self.goals.load(),
            self.projects.load(),
            self.tasks.load(),
            self.budgets.load(),
            self.expenses.load(),
            self.invoices.load(),
            self.clients.load(),
            self.users.load(),
        )?;
        Ok(())
    }

    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    /// Subscribe to change notifications from every store.
    pub fn subscribe(&self) -> Subscription<ChangeEvent> {
        self.feed.subscribe()
    }

    /// Changes to one collection only.
    pub fn subscribe_to(&self, collection: &'static str) -> Subscription<ChangeEvent> {
        self.feed
            .subscribe_where(move |change| change.collection() == Some(collection))
    }

    /// Delete a project and detach its tasks (in every brand).
    pub async fn delete_project(&self, project_id: &EntityId) -> DataResult<()> {
        let attached: Vec<EntityId> = self
            .tasks
            .repository()
            .get_all()
            .await?
            .into_iter()
            .filter(|task| task.in_project(project_id))
            .map(|task| task.id)
            .collect();

        let detach = Patch::new().clear("projectId");
        for task_id in &attached {
            self.tasks.update(task_id, &detach).await?;
        }
        self.projects.remove(project_id).await?;

        tracing::debug!(%project_id, detached = attached.len(), "project deleted");
        Ok(())
    }

    /// Delete an asset and drop its id from every collection and campaign.
    pub async fn delete_asset(&self, asset_id: &EntityId) -> DataResult<()> {
        let holders: Vec<(EntityId, Vec<EntityId>)> = self
            .collections
            .repository()
            .get_all()
            .await?
            .into_iter()
            .filter_map(|c| c.without_asset(asset_id).map(|ids| (c.id, ids)))
            .collect();
        for (collection_id, asset_ids) in holders {
            let patch = Patch::new().set("assetIds", asset_ids)?;
            self.collections.update(&collection_id, &patch).await?;
        }

        let linking: Vec<(EntityId, Vec<EntityId>)> = self
            .campaigns
            .repository()
            .get_all()
            .await?
            .into_iter()
            .filter(|c| c.links_asset(asset_id))
            .map(|c| {
                let ids = c
                    .linked_asset_ids
                    .iter()
                    .flatten()
                    .filter(|id| *id != asset_id)
                    .cloned()
                    .collect();
                (c.id, ids)
            })
            .collect();
        for (campaign_id, linked) in linking {
            let patch = Patch::new().set("linkedAssetIds", linked)?;
            self.campaigns.update(&campaign_id, &patch).await?;
        }

        self.assets.remove(asset_id).await
    }

    /// Drop the whole dataset; the next [`DataLayer::with_store`] reseeds.
    pub async fn reset(&self) -> DataResult<()> {
        for key in COLLECTIONS {
            self.store.remove(key).await?;
        }
        tracing::warn!("all collections removed");
        Ok(())
    }
}

/// Every collection key the layer manages.
pub const COLLECTIONS: [&str; 15] = [
    brandhub_brands::Brand::COLLECTION,
    Campaign::COLLECTION,
    Asset::COLLECTION,
    AssetCollection::COLLECTION,
    ContentCalendarEvent::COLLECTION,
    Influencer::COLLECTION,
    AutomationWorkflow::COLLECTION,
    Goal::COLLECTION,
    Project::COLLECTION,
    Task::COLLECTION,
    Budget::COLLECTION,
    Expense::COLLECTION,
    Invoice::COLLECTION,
    Client::COLLECTION,
    User::COLLECTION,
];

#[cfg(test)]
mod tests {
    use super::*;
    use brandhub_core::DataError;

    #[tokio::test]
    async fn ephemeral_config_opens_seeded() {
        let layer = DataLayer::open(&DataConfig::ephemeral()).await.unwrap();
        layer.load_all().await.unwrap();
        assert!(layer.brands.current_brand().is_some());
        assert!(!layer.campaigns.scoped().is_empty());
    }

    #[cfg(not(feature = "sqlite"))]
    #[tokio::test]
    async fn sqlite_backend_needs_the_feature() {
        let config = DataConfig {
            backend: StoreBackend::Sqlite("sqlite::memory:".into()),
            ..DataConfig::ephemeral()
        };
        let err = DataLayer::open(&config).await.unwrap_err();
        assert!(matches!(err, DataError::Storage(_)));
    }

    #[tokio::test]
    async fn reset_forgets_everything() {
        let store = PersistentStore::in_memory();
        let layer = DataLayer::with_store(store.clone(), RepositoryOptions::immediate())
            .await
            .unwrap();
        layer.reset().await.unwrap();
        for key in COLLECTIONS {
            assert!(!store.contains(key).await.unwrap());
        }
    }
}
