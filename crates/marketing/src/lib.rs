//! `brandhub-marketing`
//!
//! **Responsibility:** campaigns, the asset library and its collections,
//! the content calendar, goals, automations and influencers.

pub mod asset;
pub mod automation;
pub mod calendar;
pub mod campaign;
pub mod goal;
pub mod influencer;
pub mod seed;

pub use asset::{Asset, AssetCollection, GeneratedContentType};
pub use automation::{AutomationNode, AutomationWorkflow, NodeKind};
pub use calendar::{CalendarContent, CalendarEventDraft, ContentCalendarEvent};
pub use campaign::{Campaign, CampaignStatus, Kpi};
pub use goal::{Goal, SubTask};
pub use influencer::{Influencer, InfluencerPlatform};
