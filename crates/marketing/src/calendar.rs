use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

use crate::asset::GeneratedContentType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarContent {
    #[serde(rename = "type")]
    pub kind: GeneratedContentType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A piece of content scheduled on the brand's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCalendarEvent {
    pub brand_id: BrandId,
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: CalendarContent,
}

impl EntityKind for ContentCalendarEvent {
    const COLLECTION: &'static str = "db_calendar";
}

impl BrandScoped for ContentCalendarEvent {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl ContentCalendarEvent {
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// A calendar event before it is attached to a brand.
///
/// Scheduling stamps the active brand onto the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDraft {
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: CalendarContent,
}

impl CalendarEventDraft {
    pub fn for_brand(self, brand_id: BrandId) -> ContentCalendarEvent {
        ContentCalendarEvent {
            brand_id,
            date: self.date,
            title: self.title,
            content: self.content,
        }
    }
}

/// Days in `from..=to` with no event, as candidates for suggestions.
pub fn open_days<'a>(
    events: impl IntoIterator<Item = &'a ContentCalendarEvent>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    let booked: std::collections::HashSet<NaiveDate> = events.into_iter().map(|e| e.day()).collect();
    from.iter_days()
        .take_while(|day| *day <= to)
        .filter(|day| !booked.contains(day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_on(day: u32) -> ContentCalendarEvent {
        CalendarEventDraft {
            date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            title: "Post".to_string(),
            content: CalendarContent {
                kind: GeneratedContentType::SocialPost,
                text: "hello".to_string(),
                image_url: None,
            },
        }
        .for_brand(BrandId::new("brand-1"))
    }

    #[test]
    fn draft_takes_brand() {
        let event = event_on(2);
        assert!(event.belongs_to(&BrandId::new("brand-1")));
        assert!(!event.belongs_to(&BrandId::new("brand-2")));
    }

    #[test]
    fn open_days_skips_booked_days() {
        let events = [event_on(2), event_on(4)];
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        let open = open_days(events.iter(), from, to);
        let days: Vec<u32> = open.iter().map(chrono::Datelike::day).collect();
        assert_eq!(days, vec![1, 3, 5]);
    }
}
