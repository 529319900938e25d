//! Partial updates with shallow-merge semantics.
//!
//! A [`Patch`] is a set of top-level fields. Applying it to a record replaces
//! exactly those fields and leaves every other field as it was. Nested values
//! are replaced wholesale, not merged. `null` clears an optional field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{EntityKind, Record};
use crate::error::{DataError, DataResult};

/// Fields a patch may never change.
const IMMUTABLE_FIELDS: [&str; 2] = ["id", "createdAt"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value` (field names are the camelCase wire names).
    pub fn set(mut self, field: impl Into<String>, value: impl Serialize) -> DataResult<Self> {
        let value = serde_json::to_value(value)?;
        self.0.insert(field.into(), value);
        Ok(self)
    }

    /// Set `field` to an already-encoded JSON value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Clear an optional field.
    pub fn clear(mut self, field: impl Into<String>) -> Self {
        self.0.insert(field.into(), Value::Null);
        self
    }

    /// Build a patch from a JSON object.
    pub fn from_value(value: Value) -> DataResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DataError::validation(format!(
                "patch must be a JSON object, got {other}"
            ))),
        }
    }

    /// Build a patch from any serializable partial (e.g. a struct whose unset
    /// `Option` fields are skipped when serializing).
    pub fn from_partial<P: Serialize>(partial: &P) -> DataResult<Self> {
        Self::from_value(serde_json::to_value(partial)?)
    }

    pub fn touches(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow-merge this patch into `record`, producing the merged record.
    ///
    /// `id` and `createdAt` are ignored. A merge that no longer decodes as
    /// `T` is rejected and `record` is left as is.
    pub fn apply<T: EntityKind>(&self, record: &Record<T>) -> DataResult<Record<T>> {
        let mut merged = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => {
                return Err(DataError::serialization(format!(
                    "{} record does not encode as an object",
                    T::COLLECTION
                )));
            }
        };

        for (field, value) in &self.0 {
            if IMMUTABLE_FIELDS.contains(&field.as_str()) {
                tracing::debug!(collection = T::COLLECTION, field, "ignoring immutable field in patch");
                continue;
            }
            merged.insert(field.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(merged)).map_err(|err| {
            DataError::validation(format!("{}: patch rejected: {err}", T::COLLECTION))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityId;

    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Note {
        title: String,
        body: String,
        pinned: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    }

    impl EntityKind for Note {
        const COLLECTION: &'static str = "db_notes";
    }

    fn note() -> Record<Note> {
        Record::new(
            "db_notes-1",
            Note {
                title: "Launch".to_string(),
                body: "Plan the launch".to_string(),
                pinned: false,
                color: Some("red".to_string()),
            },
        )
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let patch = Patch::new().set("pinned", true).unwrap();
        let merged = patch.apply(&note()).unwrap();

        assert!(merged.pinned);
        assert_eq!(merged.title, "Launch");
        assert_eq!(merged.body, "Plan the launch");
        assert_eq!(merged.color.as_deref(), Some("red"));
    }

    #[test]
    fn null_clears_optional_field() {
        let merged = Patch::new().clear("color").apply(&note()).unwrap();
        assert_eq!(merged.color, None);
    }

    #[test]
    fn id_and_created_at_are_immutable() {
        let patch = Patch::from_value(json!({ "id": "other", "createdAt": "2020-01-01T00:00:00Z" })).unwrap();
        let merged = patch.apply(&note()).unwrap();
        assert_eq!(merged.id, EntityId::new("db_notes-1"));
        assert_eq!(merged.created_at, None);
    }

    #[test]
    fn undecodable_merge_is_rejected() {
        let patch = Patch::new().set("pinned", "yes").unwrap();
        let err = patch.apply(&note()).unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn non_object_patch_is_rejected() {
        assert!(Patch::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn from_partial_skips_unset_fields() {
        #[derive(Serialize)]
        struct NotePatch {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            body: Option<String>,
        }

        let patch = Patch::from_partial(&NotePatch {
            title: Some("Relaunch".to_string()),
            body: None,
        })
        .unwrap();

        assert!(patch.touches("title"));
        assert!(!patch.touches("body"));
        let merged = patch.apply(&note()).unwrap();
        assert_eq!(merged.title, "Relaunch");
        assert_eq!(merged.body, "Plan the launch");
    }

    proptest! {
        #[test]
        fn title_patch_leaves_other_fields(title in ".{0,40}", pinned in any::<bool>()) {
            let mut base = note();
            base.data.pinned = pinned;
            let merged = Patch::new().set("title", &title).unwrap().apply(&base).unwrap();

            prop_assert_eq!(&merged.title, &title);
            prop_assert_eq!(&merged.body, &base.body);
            prop_assert_eq!(merged.pinned, pinned);
            prop_assert_eq!(&merged.color, &base.color);
            prop_assert_eq!(&merged.id, &base.id);
        }
    }
}
