//! `brandhub-core`: data-layer building blocks.
//!
//! Pure types only: identifiers, the record envelope, patch semantics and the
//! error model. Storage lives in `brandhub-infra`.

pub mod entity;
pub mod error;
pub mod id;
pub mod patch;

pub use entity::{BrandScoped, EntityKind, Record};
pub use error::{DataError, DataResult};
pub use id::{BrandId, EntityId, IdGenerator};
pub use patch::Patch;
