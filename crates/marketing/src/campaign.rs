use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    Planning,
    Active,
    Completed,
    Archived,
}

/// A tracked KPI with its target and current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub target: f64,
    pub actual: f64,
}

impl Kpi {
    /// `actual / target`, or `None` for a zero target.
    pub fn attainment(&self) -> Option<f64> {
        (self.target != 0.0).then(|| self.actual / self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub brand_id: BrandId,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CampaignStatus,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_asset_ids: Option<Vec<EntityId>>,
}

impl EntityKind for Campaign {
    const COLLECTION: &'static str = "db_campaigns";
}

impl BrandScoped for Campaign {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Campaign {
    pub fn new(
        brand_id: impl Into<BrandId>,
        name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            brand_id: brand_id.into(),
            name: name.into(),
            description: String::new(),
            start_date,
            end_date,
            status: CampaignStatus::Planning,
            kpis: Vec::new(),
            budget: None,
            linked_asset_ids: None,
        }
    }

    pub fn is_running_at(&self, at: DateTime<Utc>) -> bool {
        self.status == CampaignStatus::Active && self.start_date <= at && at <= self.end_date
    }

    /// Mean attainment over KPIs with a non-zero target.
    pub fn kpi_attainment(&self) -> Option<f64> {
        let values: Vec<f64> = self.kpis.iter().filter_map(Kpi::attainment).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }

    pub fn links_asset(&self, asset_id: &EntityId) -> bool {
        self.linked_asset_ids
            .as_ref()
            .is_some_and(|ids| ids.contains(asset_id))
    }
}
