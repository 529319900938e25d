//! `brandhub-infra`
//!
//! **Responsibility:** persistence backends, the generic collection
//! repository, entity stores, the active-brand context and the wiring that
//! puts them together.

pub mod brand_context;
pub mod brand_resources;
pub mod config;
pub mod data_layer;
pub mod entity_store;
pub mod persistence;
pub mod repository;
pub mod seeding;
pub mod stores;
#[cfg(test)]
mod test_support;

pub use brand_context::{ActiveBrandContext, BrandPhase};
pub use brand_resources::BrandLocks;
pub use config::{ConfigError, DataConfig, StoreBackend};
pub use data_layer::DataLayer;
pub use entity_store::{BrandSelection, EntityStore};
pub use persistence::{FileKvStore, InMemoryKvStore, KeyValueStore, KvError, Loaded, PersistentStore};
pub use repository::{CollectionRepository, CorruptionPolicy, Latency, RepositoryOptions};
pub use seeding::{Fixtures, seed_if_empty};
