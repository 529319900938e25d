use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub brand_id: BrandId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl EntityKind for Project {
    const COLLECTION: &'static str = "db_projects";
}

impl BrandScoped for Project {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Project {
    pub fn is_open(&self) -> bool {
        !matches!(self.status, ProjectStatus::Completed)
    }

    /// Whole days left until `end_date`, negative once past.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.end_date - now).num_days()
    }
}
