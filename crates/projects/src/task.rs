use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// A unit of work, optionally attached to a project.
///
/// `project_id` is a soft reference: deleting the project clears it rather
/// than deleting the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub brand_id: BrandId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<EntityId>,
}

impl EntityKind for Task {
    const COLLECTION: &'static str = "db_tasks";
}

impl BrandScoped for Task {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Task {
    pub fn new(brand_id: impl Into<BrandId>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            brand_id: brand_id.into(),
            project_id: None,
            title: title.into(),
            description: None,
            due_date,
            status: TaskStatus::ToDo,
            assignee: None,
        }
    }

    pub fn in_project(&self, project_id: &EntityId) -> bool {
        self.project_id.as_ref() == Some(project_id)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date < today
    }
}
