//! Data-layer error model.

use thiserror::Error;

/// Result type used across the data layer.
pub type DataResult<T> = Result<T, DataError>;

/// Data-layer error.
///
/// Repository rejections surface to callers unchanged; entity stores never
/// catch them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The target record does not exist in its collection.
    #[error("{collection}: record not found: {id}")]
    NotFound { collection: String, id: String },

    /// Persisted data could not be decoded, or a value could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The storage backend failed a read or write.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A patch or input value was malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation needs an active brand and none is selected.
    #[error("no active brand selected")]
    NoActiveBrand,
}

impl DataError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
