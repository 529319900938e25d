use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

/// An agency client. Clients are not owned by a brand; they are linked to
/// any number of brands through `brand_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    pub contact_email: String,
    #[serde(default)]
    pub brand_ids: Vec<BrandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<DateTime<Utc>>,
}

impl EntityKind for Client {
    const COLLECTION: &'static str = "db_clients";
}

impl BrandScoped for Client {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        self.brand_ids.contains(brand)
    }
}

impl Client {
    pub fn new(name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_email: contact_email.into(),
            brand_ids: Vec::new(),
            notes: None,
            last_contacted: None,
        }
    }

    /// Whole days since the last contact, if any was recorded.
    pub fn days_since_contact(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_contacted.map(|at| (now - at).num_days())
    }
}
