//! Entity-specific operations on top of the generic [`EntityStore`].

use std::sync::Arc;

use brandhub_core::{DataError, DataResult, EntityId, Patch, Record};
use brandhub_financials::Expense;
use brandhub_marketing::{Asset, AssetCollection, CalendarEventDraft, ContentCalendarEvent, Goal};
use brandhub_projects::Task;

use crate::entity_store::EntityStore;

impl EntityStore<Task> {
    /// Active-brand tasks attached to `project_id`.
    pub fn tasks_for_project(&self, project_id: &EntityId) -> Vec<Arc<Record<Task>>> {
        self.scoped_where(|task| task.in_project(project_id))
    }
}

impl EntityStore<Expense> {
    /// Active-brand expenses drawn from `budget_id`.
    pub fn expenses_for_budget(&self, budget_id: &EntityId) -> Vec<Arc<Record<Expense>>> {
        self.scoped_where(|expense| &expense.budget_id == budget_id)
    }
}

impl EntityStore<Goal> {
    /// Flip one sub-task of a cached goal.
    pub async fn toggle_sub_task(&self, goal_id: &EntityId, sub_task_id: &str) -> DataResult<Arc<Record<Goal>>> {
        let goal = self
            .get(goal_id)
            .ok_or_else(|| DataError::not_found(self.collection(), goal_id.as_str()))?;
        let sub_tasks = goal
            .toggled(sub_task_id)
            .ok_or_else(|| DataError::not_found("subTasks", sub_task_id))?;

        self.update(goal_id, &Patch::new().set("subTasks", sub_tasks)?).await
    }
}

impl EntityStore<AssetCollection> {
    /// New empty collection owned by the active brand.
    pub async fn create_collection(&self, name: impl Into<String>) -> DataResult<Arc<Record<AssetCollection>>> {
        let brand = self.require_brand()?;
        self.add(AssetCollection::new(brand, name)).await
    }

    /// Append `asset_id` to a cached collection. Already-present ids are
    /// left alone and nothing is written.
    pub async fn add_asset_to_collection(
        &self,
        collection_id: &EntityId,
        asset_id: &EntityId,
    ) -> DataResult<Arc<Record<AssetCollection>>> {
        let collection = self.cached(collection_id)?;
        match collection.with_asset(asset_id) {
            Some(asset_ids) => {
                self.update(collection_id, &Patch::new().set("assetIds", asset_ids)?)
                    .await
            }
            None => Ok(collection),
        }
    }

    pub async fn remove_asset_from_collection(
        &self,
        collection_id: &EntityId,
        asset_id: &EntityId,
    ) -> DataResult<Arc<Record<AssetCollection>>> {
        let collection = self.cached(collection_id)?;
        match collection.without_asset(asset_id) {
            Some(asset_ids) => {
                self.update(collection_id, &Patch::new().set("assetIds", asset_ids)?)
                    .await
            }
            None => Ok(collection),
        }
    }

    /// Collections of the active brand that hold `asset_id`.
    pub fn collections_with(&self, asset_id: &EntityId) -> Vec<Arc<Record<AssetCollection>>> {
        self.scoped_where(|collection| collection.contains(asset_id))
    }

    fn cached(&self, id: &EntityId) -> DataResult<Arc<Record<AssetCollection>>> {
        self.get(id)
            .ok_or_else(|| DataError::not_found(self.collection(), id.as_str()))
    }
}

impl EntityStore<ContentCalendarEvent> {
    /// Put `draft` on the active brand's calendar.
    pub async fn schedule_event(&self, draft: CalendarEventDraft) -> DataResult<Arc<Record<ContentCalendarEvent>>> {
        let brand = self.require_brand()?;
        self.add(draft.for_brand(brand)).await
    }
}

impl EntityStore<Asset> {
    /// Active-brand assets carrying `tag`.
    pub fn tagged(&self, tag: &str) -> Vec<Arc<Record<Asset>>> {
        self.scoped_where(|asset| asset.has_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, Utc};

    use brandhub_core::BrandId;
    use brandhub_events::ChangeFeed;
    use brandhub_marketing::{CalendarContent, GeneratedContentType, SubTask};
    use brandhub_projects::TaskStatus;

    use crate::entity_store::BrandSelection;
    use crate::persistence::PersistentStore;
    use crate::repository::{CollectionRepository, RepositoryOptions};

    fn store<T: brandhub_core::EntityKind>(seed: Vec<Record<T>>, brand: Option<&str>) -> EntityStore<T> {
        let repo = CollectionRepository::new(PersistentStore::in_memory(), seed, RepositoryOptions::immediate());
        EntityStore::new(
            Arc::new(repo),
            BrandSelection::fixed(brand.map(BrandId::new)),
            Arc::new(ChangeFeed::new()),
        )
    }

    #[tokio::test]
    async fn tasks_for_project_stays_in_brand() {
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let task = |brand: &str, project: &str| Task {
            project_id: Some(EntityId::new(project)),
            status: TaskStatus::ToDo,
            ..Task::new(brand, "t", due)
        };
        let tasks = store(
            vec![
                Record::new("task-1", task("brand-1", "proj-1")),
                Record::new("task-2", task("brand-1", "proj-2")),
                Record::new("task-3", task("brand-2", "proj-1")),
            ],
            Some("brand-1"),
        );
        tasks.load().await.unwrap();

        let found = tasks.tasks_for_project(&EntityId::new("proj-1"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "task-1");
    }

    #[tokio::test]
    async fn toggling_a_sub_task() {
        let goals = store(
            vec![Record::new(
                "goal-1",
                Goal {
                    brand_id: BrandId::new("brand-1"),
                    title: "g".into(),
                    sub_tasks: vec![SubTask { id: "gst-1".into(), text: "x".into(), completed: false }],
                },
            )],
            Some("brand-1"),
        );
        goals.load().await.unwrap();

        let goal = goals.toggle_sub_task(&EntityId::new("goal-1"), "gst-1").await.unwrap();
        assert!(goal.sub_tasks[0].completed);

        let err = goals.toggle_sub_task(&EntityId::new("goal-1"), "gst-9").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn collection_membership_is_a_set() {
        let collections: EntityStore<AssetCollection> = store(vec![], Some("brand-1"));
        collections.load().await.unwrap();

        let created = collections.create_collection("Launch").await.unwrap();
        assert_eq!(created.brand_id, "brand-1");

        let asset = EntityId::new("asset-1");
        collections.add_asset_to_collection(&created.id, &asset).await.unwrap();
        let revision = collections.revision();
        let again = collections.add_asset_to_collection(&created.id, &asset).await.unwrap();
        assert_eq!(again.asset_ids, vec![asset.clone()]);
        assert_eq!(collections.revision(), revision);

        let emptied = collections.remove_asset_from_collection(&created.id, &asset).await.unwrap();
        assert!(emptied.asset_ids.is_empty());
    }

    #[tokio::test]
    async fn brand_stamping_needs_an_active_brand() {
        let collections: EntityStore<AssetCollection> = store(vec![], None);
        assert_eq!(
            collections.create_collection("x").await.unwrap_err(),
            DataError::NoActiveBrand
        );

        let calendar: EntityStore<ContentCalendarEvent> = store(vec![], Some("brand-2"));
        let draft = CalendarEventDraft {
            date: Utc::now(),
            title: "Post".into(),
            content: CalendarContent {
                kind: GeneratedContentType::SocialPost,
                text: "hi".into(),
                image_url: None,
            },
        };
        let event = calendar.schedule_event(draft).await.unwrap();
        assert_eq!(event.brand_id, "brand-2");
        assert_eq!(calendar.scoped().len(), 1);
    }
}
