//! Change notifications published by the data layer.

use brandhub_core::{BrandId, EntityId};
use serde::{Deserialize, Serialize};

use crate::in_memory_bus::InMemoryEventBus;

/// A data-layer state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChangeEvent {
    /// A store finished loading its collection.
    Loaded { collection: String, count: usize },
    Added { collection: String, id: EntityId },
    Updated { collection: String, id: EntityId },
    Removed { collection: String, id: EntityId },
    /// The active brand changed (`None` when no brand is selected).
    #[serde(rename_all = "camelCase")]
    BrandSelected { brand_id: Option<BrandId> },
}

impl ChangeEvent {
    pub fn loaded(collection: &str, count: usize) -> Self {
        Self::Loaded {
            collection: collection.to_string(),
            count,
        }
    }

    pub fn added(collection: &str, id: &EntityId) -> Self {
        Self::Added {
            collection: collection.to_string(),
            id: id.clone(),
        }
    }

    pub fn updated(collection: &str, id: &EntityId) -> Self {
        Self::Updated {
            collection: collection.to_string(),
            id: id.clone(),
        }
    }

    pub fn removed(collection: &str, id: &EntityId) -> Self {
        Self::Removed {
            collection: collection.to_string(),
            id: id.clone(),
        }
    }

    /// Collection the change applies to; `None` for brand selection.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Self::Loaded { collection, .. }
            | Self::Added { collection, .. }
            | Self::Updated { collection, .. }
            | Self::Removed { collection, .. } => Some(collection),
            Self::BrandSelected { .. } => None,
        }
    }

    pub fn record_id(&self) -> Option<&EntityId> {
        match self {
            Self::Added { id, .. } | Self::Updated { id, .. } | Self::Removed { id, .. } => Some(id),
            Self::Loaded { .. } | Self::BrandSelected { .. } => None,
        }
    }
}

/// The process-wide change feed.
pub type ChangeFeed = InMemoryEventBus<ChangeEvent>;
