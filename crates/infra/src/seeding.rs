//! First-run fixture data.

use chrono::{DateTime, Utc};

use brandhub_brands::Brand;
use brandhub_clients::{Client, User};
use brandhub_core::{DataResult, EntityKind, Record};
use brandhub_financials::{Budget, Expense, Invoice};
use brandhub_marketing::{
    Asset, AssetCollection, AutomationWorkflow, Campaign, ContentCalendarEvent, Goal, Influencer,
};
use brandhub_projects::{Project, Task};

use crate::persistence::PersistentStore;

/// The built-in dataset, one list per collection.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub brands: Vec<Record<Brand>>,
    pub campaigns: Vec<Record<Campaign>>,
    pub assets: Vec<Record<Asset>>,
    pub collections: Vec<Record<AssetCollection>>,
    pub calendar: Vec<Record<ContentCalendarEvent>>,
    pub influencers: Vec<Record<Influencer>>,
    pub automations: Vec<Record<AutomationWorkflow>>,
    pub goals: Vec<Record<Goal>>,
    pub projects: Vec<Record<Project>>,
    pub tasks: Vec<Record<Task>>,
    pub budgets: Vec<Record<Budget>>,
    pub expenses: Vec<Record<Expense>>,
    pub invoices: Vec<Record<Invoice>>,
    pub clients: Vec<Record<Client>>,
    pub users: Vec<Record<User>>,
}

impl Fixtures {
    /// Fixtures with dates laid out around `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            brands: brandhub_brands::seed::brands(),
            campaigns: brandhub_marketing::seed::campaigns(now),
            assets: brandhub_marketing::seed::assets(now),
            collections: brandhub_marketing::seed::collections(),
            calendar: brandhub_marketing::seed::calendar_events(now),
            influencers: brandhub_marketing::seed::influencers(),
            automations: brandhub_marketing::seed::automations(),
            goals: brandhub_marketing::seed::goals(),
            projects: brandhub_projects::seed::projects(now),
            tasks: brandhub_projects::seed::tasks(now),
            budgets: brandhub_financials::seed::budgets(now),
            expenses: brandhub_financials::seed::expenses(now),
            invoices: brandhub_financials::seed::invoices(now),
            clients: brandhub_clients::seed::clients(now),
            users: brandhub_clients::seed::users(),
        }
    }
}

async fn put<T: EntityKind>(store: &PersistentStore, records: &[Record<T>]) -> DataResult<()> {
    store.try_set(T::COLLECTION, records).await
}

/// Write every fixture collection unless the brand collection already
/// exists. Returns whether anything was written.
///
/// Brands go last: a run interrupted half-way is seeded again next time.
pub async fn seed_if_empty(store: &PersistentStore, fixtures: &Fixtures) -> DataResult<bool> {
    if store.contains(Brand::COLLECTION).await? {
        tracing::debug!("store already initialised; skipping fixtures");
        return Ok(false);
    }

    put(store, &fixtures.campaigns).await?;
    put(store, &fixtures.assets).await?;
    put(store, &fixtures.collections).await?;
    put(store, &fixtures.calendar).await?;
    put(store, &fixtures.influencers).await?;
    put(store, &fixtures.automations).await?;
    put(store, &fixtures.goals).await?;
    put(store, &fixtures.projects).await?;
    put(store, &fixtures.tasks).await?;
    put(store, &fixtures.budgets).await?;
    put(store, &fixtures.expenses).await?;
    put(store, &fixtures.invoices).await?;
    put(store, &fixtures.clients).await?;
    put(store, &fixtures.users).await?;
    put(store, &fixtures.brands).await?;

    tracing::info!(brands = fixtures.brands.len(), "seeded fixture data");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_once() {
        let store = PersistentStore::in_memory();
        let fixtures = Fixtures::at(Utc::now());

        assert!(seed_if_empty(&store, &fixtures).await.unwrap());
        assert!(!seed_if_empty(&store, &fixtures).await.unwrap());

        let tasks: Vec<Record<Task>> = store.get(Task::COLLECTION, Vec::new()).await;
        assert_eq!(tasks.len(), fixtures.tasks.len());
    }

    #[tokio::test]
    async fn existing_brands_block_seeding() {
        let store = PersistentStore::in_memory();
        store.try_set(Brand::COLLECTION, &Vec::<Record<Brand>>::new()).await.unwrap();

        assert!(!seed_if_empty(&store, &Fixtures::at(Utc::now())).await.unwrap());
        assert!(!store.contains(Campaign::COLLECTION).await.unwrap());
    }
}
