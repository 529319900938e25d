use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

/// Kind of content produced by the studio tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratedContentType {
    #[serde(rename = "Social Post")]
    SocialPost,
    #[serde(rename = "Ad Copy")]
    AdCopy,
    #[serde(rename = "Blog Idea")]
    BlogIdea,
    Image,
    Email,
    #[serde(rename = "Repurposed Content")]
    RepurposedContent,
}

/// A saved piece of content. Records carry `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub brand_id: BrandId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GeneratedContentType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EntityKind for Asset {
    const COLLECTION: &'static str = "db_assets";
    const STAMPS_CREATION: bool = true;
}

impl BrandScoped for Asset {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Asset {
    pub fn new(
        brand_id: impl Into<BrandId>,
        name: impl Into<String>,
        kind: GeneratedContentType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            brand_id: brand_id.into(),
            name: name.into(),
            kind,
            content: content.into(),
            image_url: None,
            tags: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

/// A named, ordered set of assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCollection {
    pub brand_id: BrandId,
    pub name: String,
    #[serde(default)]
    pub asset_ids: Vec<EntityId>,
}

impl EntityKind for AssetCollection {
    const COLLECTION: &'static str = "db_collections";
}

impl BrandScoped for AssetCollection {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl AssetCollection {
    pub fn new(brand_id: impl Into<BrandId>, name: impl Into<String>) -> Self {
        Self {
            brand_id: brand_id.into(),
            name: name.into(),
            asset_ids: Vec::new(),
        }
    }

    pub fn contains(&self, asset_id: &EntityId) -> bool {
        self.asset_ids.contains(asset_id)
    }

    /// Membership after adding `asset_id`; `None` when already a member.
    pub fn with_asset(&self, asset_id: &EntityId) -> Option<Vec<EntityId>> {
        if self.contains(asset_id) {
            return None;
        }
        let mut ids = self.asset_ids.clone();
        ids.push(asset_id.clone());
        Some(ids)
    }

    /// Membership after removing `asset_id`; `None` when not a member.
    pub fn without_asset(&self, asset_id: &EntityId) -> Option<Vec<EntityId>> {
        if !self.contains(asset_id) {
            return None;
        }
        Some(self.asset_ids.iter().filter(|id| *id != asset_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn content_type_wire_names() {
        assert_eq!(
            serde_json::to_value(GeneratedContentType::RepurposedContent).unwrap(),
            "Repurposed Content"
        );
        let asset = Asset::new("brand-1", "Post", GeneratedContentType::SocialPost, "hello");
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["type"], "Social Post");
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        let mut asset = Asset::new("brand-1", "Post", GeneratedContentType::SocialPost, "hello");
        assert!(!asset.has_tag("eco"));
        asset.tags = Some(vec!["Eco".into()]);
        assert!(asset.has_tag("eco"));
    }

    #[test]
    fn removing_a_non_member_is_a_no_op() {
        let collection = AssetCollection::new("brand-1", "Launch");
        assert_eq!(collection.without_asset(&EntityId::new("asset-1")), None);
    }

    proptest! {
        #[test]
        fn adding_is_idempotent(ids in proptest::collection::vec("[a-d]", 0..12)) {
            let mut collection = AssetCollection::new("brand-1", "Set");
            for id in &ids {
                let id = EntityId::new(id.as_str());
                if let Some(next) = collection.with_asset(&id) {
                    collection.asset_ids = next;
                }
                prop_assert!(collection.with_asset(&id).is_none());
            }

            let mut seen = std::collections::HashSet::new();
            prop_assert!(collection.asset_ids.iter().all(|id| seen.insert(id.clone())));
        }
    }
}
