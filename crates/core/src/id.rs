//! Identifiers and id generation.
//!
//! Ids are opaque strings. Generated ids follow `{prefix}-{unix millis}`;
//! fixture data uses short hand-written ids such as `brand-1`.

use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier of any stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

/// Identifier of a brand (the scoping dimension for most collections).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

impl_string_id!(EntityId);
impl_string_id!(BrandId);

// A brand record's id doubles as the brand id other records point at.
impl From<EntityId> for BrandId {
    fn from(value: EntityId) -> Self {
        Self(value.0)
    }
}

impl From<&EntityId> for BrandId {
    fn from(value: &EntityId) -> Self {
        Self(value.0.clone())
    }
}

impl From<BrandId> for EntityId {
    fn from(value: BrandId) -> Self {
        Self(value.0)
    }
}

impl From<&BrandId> for EntityId {
    fn from(value: &BrandId) -> Self {
        Self(value.0.clone())
    }
}

/// Timestamp-derived id generator.
///
/// Plain `{prefix}-{millis}` ids collide when two records are created in
/// the same millisecond; this generator keeps the format but never returns a
/// stamp lower than or equal to the last one it handed out.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    last: Mutex<i64>,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last: Mutex::new(0),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next id, strictly increasing within this generator.
    pub fn next_id(&self) -> EntityId {
        self.next_unique(|_| false)
    }

    /// Next id that `taken` does not reject.
    ///
    /// Used against the ids already present in a collection, which may come
    /// from a previous process whose stamps are ahead of this one's clock.
    pub fn next_unique(&self, taken: impl Fn(&str) -> bool) -> EntityId {
        let now = Utc::now().timestamp_millis();
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut stamp = now.max(*last + 1);
        let mut candidate = format!("{}-{}", self.prefix, stamp);
        while taken(&candidate) {
            stamp += 1;
            candidate = format!("{}-{}", self.prefix, stamp);
        }

        *last = stamp;
        EntityId(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use proptest::prelude::*;

    #[test]
    fn generated_ids_carry_prefix() {
        let ids = IdGenerator::new("db_campaigns");
        let id = ids.next_id();
        assert!(id.as_str().starts_with("db_campaigns-"));
        let stamp: i64 = id.as_str()["db_campaigns-".len()..].parse().unwrap();
        assert!(stamp > 0);
    }

    #[test]
    fn skips_ids_already_taken() {
        let ids = IdGenerator::new("x");
        let first = ids.next_id();
        let first_stamp: i64 = first.as_str()[2..].parse().unwrap();

        let blocked: HashSet<String> = (1..=3).map(|n| format!("x-{}", first_stamp + n)).collect();
        let next = ids.next_unique(|c| blocked.contains(c));
        let next_stamp: i64 = next.as_str()[2..].parse().unwrap();

        assert!(next_stamp > first_stamp + 3);
    }

    #[test]
    fn brand_and_entity_ids_convert() {
        let entity = EntityId::new("brand-1");
        let brand: BrandId = (&entity).into();
        assert_eq!(brand, "brand-1");
        assert_eq!(EntityId::from(brand), entity);
    }

    proptest! {
        #[test]
        fn rapid_generation_never_repeats(count in 1usize..200) {
            let ids = IdGenerator::new("db_tasks");
            let mut seen = HashSet::new();
            for _ in 0..count {
                prop_assert!(seen.insert(ids.next_id()));
            }
        }
    }
}
