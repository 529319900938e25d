//! Response shapes of the generation service.
//!
//! These mirror the service's JSON and are deliberately independent of the
//! stored entity types; callers convert what they keep.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogIdea {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordRelevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordIntent {
    Informational,
    Commercial,
    Navigational,
    Transactional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoKeyword {
    pub keyword: String,
    pub relevance: KeywordRelevance,
    pub intent: KeywordIntent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContent {
    pub subject: String,
    pub preview_text: String,
    pub body: String,
}

/// Subject and body; used for invoice reminders and influencer outreach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionContent {
    /// Content type wire name, e.g. `Social Post`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSuggestion {
    /// ISO date or date-time as sent by the service.
    pub date: String,
    pub title: String,
    pub content: SuggestionContent,
}

impl CalendarSuggestion {
    /// The calendar day, if `date` starts with `YYYY-MM-DD`.
    pub fn day(&self) -> Option<NaiveDate> {
        let prefix = self.date.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    /// `trigger`, `action`, `delay` or `condition`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A drafted automation: everything but the owner and the active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub trigger: WorkflowNode,
    #[serde(default)]
    pub steps: Vec<WorkflowNode>,
}

pub type AutomationRecipe = WorkflowDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdeaCategory {
    #[serde(rename = "Practical Task")]
    PracticalTask,
    #[serde(rename = "Big Concept")]
    BigConcept,
    #[serde(rename = "Wildcard Idea")]
    WildcardIdea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainstormIdea {
    pub text: String,
    pub category: IdeaCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTarget {
    pub name: String,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub kpis: Vec<KpiTarget>,
}

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One step of a goal breakdown; the service sends either bare strings or
/// `{ "text": .. }` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum BreakdownStep {
    Text(String),
    Object { text: String },
}

impl BreakdownStep {
    pub(crate) fn into_text(self) -> String {
        match self {
            BreakdownStep::Text(text) | BreakdownStep::Object { text } => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn suggestion_day_accepts_dates_and_timestamps() {
        let mut suggestion: CalendarSuggestion = serde_json::from_value(json!({
            "date": "2024-06-03",
            "title": "Teaser",
            "content": { "type": "Social Post", "text": "Soon." }
        }))
        .unwrap();
        assert_eq!(suggestion.day(), NaiveDate::from_ymd_opt(2024, 6, 3));

        suggestion.date = "2024-06-04T09:00:00.000Z".into();
        assert_eq!(suggestion.day(), NaiveDate::from_ymd_opt(2024, 6, 4));

        suggestion.date = "next week".into();
        assert_eq!(suggestion.day(), None);
    }

    #[test]
    fn idea_categories_use_display_names() {
        let idea: BrainstormIdea =
            serde_json::from_value(json!({ "text": "Pop-up store", "category": "Big Concept" })).unwrap();
        assert_eq!(idea.category, IdeaCategory::BigConcept);
    }
}
