//! Entity kinds and the persisted record envelope.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::id::{BrandId, EntityId};

/// A collection-backed entity type.
///
/// Implementors are the *data* of a record; the id (and creation stamp where
/// applicable) live in [`Record`].
pub trait EntityKind:
    Serialize + DeserializeOwned + Clone + core::fmt::Debug + Send + Sync + 'static
{
    /// Storage key of the collection, also the prefix of generated ids.
    const COLLECTION: &'static str;

    /// Whether records get a `createdAt` stamp when added.
    const STAMPS_CREATION: bool = false;
}

/// Brand-scoping predicate for brand-scoped views.
pub trait BrandScoped {
    /// Whether this entity shows up in the view of `brand`.
    fn belongs_to(&self, brand: &BrandId) -> bool;
}

/// Persisted form of an entity: `{ "id", ["createdAt"], ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: EntityId,

    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: impl Into<EntityId>, data: T) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            data,
        }
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }
}

impl<T> core::ops::Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T: BrandScoped> BrandScoped for Record<T> {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        self.data.belongs_to(brand)
    }
}
