use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfluencerPlatform {
    Instagram,
    TikTok,
    YouTube,
    #[serde(rename = "Twitter/X")]
    TwitterX,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub brand_id: BrandId,
    pub name: String,
    pub handle: String,
    pub platform: InfluencerPlatform,
    pub followers: u64,
    /// Percentage, e.g. `3.5` for 3.5%.
    pub engagement_rate: f64,
    pub avatar_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl EntityKind for Influencer {
    const COLLECTION: &'static str = "db_influencers";
}

impl BrandScoped for Influencer {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Influencer {
    /// Expected interactions per post.
    pub fn expected_engagements(&self) -> u64 {
        (self.followers as f64 * self.engagement_rate / 100.0).round() as u64
    }
}
