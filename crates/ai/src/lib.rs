//! `brandhub-ai`
//!
//! **Responsibility:** client for the external content-generation service.
//!
//! This crate is intentionally **not** part of the data layer:
//! - It does not depend on the domain crates; brand, client and financial
//!   context is passed in as any `Serialize` value.
//! - It never writes to the store. Callers decide what to keep.
//! - Failures are returned, not retried.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{GenerationClient, SocialPlatform};
pub use config::GenerationConfig;
pub use error::{GenerationError, GenerationResult};
pub use transport::{GenerationTransport, HttpTransport};
pub use types::{
    AutomationRecipe, BlogIdea, BrainstormIdea, CalendarSuggestion, CampaignBrief, DateRange, EmailContent,
    EmailDraft, IdeaCategory, KeywordIntent, KeywordRelevance, KpiTarget, SeoKeyword, SuggestedTask,
    SuggestionContent, WorkflowDraft, WorkflowNode,
};
