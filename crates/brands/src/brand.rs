use serde::{Deserialize, Serialize};

use brandhub_core::{EntityId, EntityKind};

/// Voice a brand writes in by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneOfVoice {
    Professional,
    Casual,
    Witty,
    Enthusiastic,
    Formal,
    Humorous,
}

/// A competitor tracked for a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// AI-generated analysis, if one has been run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

/// Input for adding a competitor; the id is generated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetitor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl NewCompetitor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website: None,
        }
    }
}

/// Partial update of a competitor. `None` leaves a field alone;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompetitorUpdate {
    pub name: Option<String>,
    pub website: Option<Option<String>>,
    pub analysis: Option<Option<String>>,
}

impl CompetitorUpdate {
    pub fn analysis(text: impl Into<String>) -> Self {
        Self {
            analysis: Some(Some(text.into())),
            ..Self::default()
        }
    }

    /// Merge into `competitor`; the id never changes.
    pub fn apply(&self, competitor: &Competitor) -> Competitor {
        let mut next = competitor.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(website) = &self.website {
            next.website = website.clone();
        }
        if let Some(analysis) = &self.analysis {
            next.analysis = analysis.clone();
        }
        next
    }
}

/// Third-party integrations a brand can connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationId {
    GoogleAnalytics,
    GoogleAds,
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Wordpress,
    Shopify,
    Mailchimp,
    Salesforce,
    Slack,
    Hootsuite,
}

impl IntegrationId {
    pub const ALL: [IntegrationId; 12] = [
        IntegrationId::GoogleAnalytics,
        IntegrationId::GoogleAds,
        IntegrationId::Twitter,
        IntegrationId::Facebook,
        IntegrationId::Instagram,
        IntegrationId::Linkedin,
        IntegrationId::Wordpress,
        IntegrationId::Shopify,
        IntegrationId::Mailchimp,
        IntegrationId::Salesforce,
        IntegrationId::Slack,
        IntegrationId::Hootsuite,
    ];

    /// Wire name, e.g. `googleAnalytics`.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegrationId::GoogleAnalytics => "googleAnalytics",
            IntegrationId::GoogleAds => "googleAds",
            IntegrationId::Twitter => "twitter",
            IntegrationId::Facebook => "facebook",
            IntegrationId::Instagram => "instagram",
            IntegrationId::Linkedin => "linkedin",
            IntegrationId::Wordpress => "wordpress",
            IntegrationId::Shopify => "shopify",
            IntegrationId::Mailchimp => "mailchimp",
            IntegrationId::Salesforce => "salesforce",
            IntegrationId::Slack => "slack",
            IntegrationId::Hootsuite => "hootsuite",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IntegrationId::GoogleAnalytics => "Google Analytics",
            IntegrationId::GoogleAds => "Google Ads",
            IntegrationId::Twitter => "Twitter / X",
            IntegrationId::Facebook => "Facebook",
            IntegrationId::Instagram => "Instagram",
            IntegrationId::Linkedin => "LinkedIn",
            IntegrationId::Wordpress => "WordPress",
            IntegrationId::Shopify => "Shopify",
            IntegrationId::Mailchimp => "Mailchimp",
            IntegrationId::Salesforce => "Salesforce",
            IntegrationId::Slack => "Slack",
            IntegrationId::Hootsuite => "Hootsuite",
        }
    }

    pub fn category(self) -> IntegrationCategory {
        match self {
            IntegrationId::GoogleAnalytics => IntegrationCategory::Analytics,
            IntegrationId::GoogleAds => IntegrationCategory::Ads,
            IntegrationId::Twitter
            | IntegrationId::Facebook
            | IntegrationId::Instagram
            | IntegrationId::Linkedin
            | IntegrationId::Hootsuite => IntegrationCategory::Social,
            IntegrationId::Wordpress => IntegrationCategory::Publishing,
            IntegrationId::Shopify => IntegrationCategory::Commerce,
            IntegrationId::Mailchimp => IntegrationCategory::Email,
            IntegrationId::Salesforce => IntegrationCategory::Crm,
            IntegrationId::Slack => IntegrationCategory::Communication,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationCategory {
    Analytics,
    Social,
    Publishing,
    Commerce,
    Ads,
    Email,
    #[serde(rename = "CRM")]
    Crm,
    Communication,
}

/// Connection flag for one integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: IntegrationId,
    pub name: String,
    pub connected: bool,
    pub category: IntegrationCategory,
}

impl Integration {
    pub fn new(id: IntegrationId, connected: bool) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            connected,
            category: id.category(),
        }
    }

    /// One entry per known integration, connected iff listed.
    pub fn full_set(connected: &[IntegrationId]) -> Vec<Integration> {
        IntegrationId::ALL
            .iter()
            .map(|id| Integration::new(*id, connected.contains(id)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFonts {
    pub primary: String,
    pub secondary: String,
}

/// A managed marketing identity: voice, style, competitors and integrations.
///
/// `competitors` and `integrations` are embedded collections. They change only
/// through the dedicated sub-resource operations, never through a profile
/// patch (see [`Brand::EMBEDDED_FIELDS`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: String,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_tone: Option<ToneOfVoice>,
    #[serde(default)]
    pub messaging_pillars: Vec<String>,
    #[serde(default)]
    pub dos: Vec<String>,
    #[serde(default)]
    pub donts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BrandColors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<BrandFonts>,
    #[serde(default)]
    pub approved_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

impl EntityKind for Brand {
    const COLLECTION: &'static str = "db_brands";
}

impl Brand {
    /// Wire names of the embedded sub-collections.
    pub const EMBEDDED_FIELDS: [&'static str; 2] = ["competitors", "integrations"];

    pub fn competitor(&self, id: &EntityId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| &c.id == id)
    }

    pub fn integration(&self, id: IntegrationId) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.id == id)
    }

    pub fn connected_integrations(&self) -> impl Iterator<Item = &Integration> {
        self.integrations.iter().filter(|i| i.connected)
    }

    pub fn is_connected(&self, id: IntegrationId) -> bool {
        self.integration(id).is_some_and(|i| i.connected)
    }
}
