use crate::utils::time::query_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Location shown when an event has none
pub const LOCATION_FALLBACK: &str = "TBD";

/// End time shown when an occurrence has no usable end
pub const END_TIME_PLACEHOLDER: &str = "TBD";

/// Event as returned by `/event` and `/event/filtered`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub is_recurring: Option<bool>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub location: Option<EventLocation>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurrences: Option<Vec<Occurrence>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EventLocation {
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// One dated instance of an event
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Occurrence {
    #[serde(default)]
    pub occurrence_id: Option<i64>,
    #[serde(default)]
    pub greg_occur_date: Option<String>,
    #[serde(default)]
    pub greg_end_date: Option<String>,
}

/// Criteria for `/event/filtered`; empty lists mean "any"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub event_types: Vec<String>,
    pub areas: Vec<String>,
    pub is_recurring: Vec<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventFilter {
    /// Query parameters: lists comma-joined, dates as `yyyy-MM-dd`
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.event_types.is_empty() {
            pairs.push(("event_type", self.event_types.join(",")));
        }
        if !self.areas.is_empty() {
            pairs.push(("area", self.areas.join(",")));
        }
        if !self.is_recurring.is_empty() {
            let flags: Vec<String> = self.is_recurring.iter().map(bool::to_string).collect();
            pairs.push(("is_recurring", flags.join(",")));
        }
        if let Some(start) = &self.start_date {
            pairs.push(("start_date", query_date(start)));
        }
        if let Some(end) = &self.end_date {
            pairs.push(("end_date", query_date(end)));
        }

        pairs
    }
}

/// Body for creating or updating an event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventPayload {
    pub event_name: String,
    pub event_type: String,
    pub area: String,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub occurrences: Vec<OccurrencePayload>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OccurrencePayload {
    pub greg_occur_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greg_end_date: Option<DateTime<Utc>>,
}

/// One display row per (event, occurrence), rebuilt on every fetch
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayEvent {
    pub id: i64,
    pub occurrence_id: i64,
    pub name: String,
    pub event_type: Option<String>,
    pub area: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub is_recurring: bool,
    /// Start day in the display timezone
    pub date: NaiveDate,
    /// End day in the display timezone; equals `date` when there is no usable end
    pub end_date: NaiveDate,
    pub date_string: String,
    pub day_of_week: String,
    pub date_range: Vec<NaiveDate>,
    pub is_same_day: bool,
    pub is_same_month: bool,
    pub start_time: String,
    pub end_time: String,
    /// Time label for the first day; see [`DisplayEvent::time_for_day`]
    pub time: String,
}

impl DisplayEvent {
    /// Time label to show on a given day of the range.
    ///
    /// Only single-day occurrences and the first day of a range show a time.
    pub fn time_for_day(&self, day: NaiveDate) -> String {
        if self.is_same_day || day == self.date {
            self.time.clone()
        } else {
            String::new()
        }
    }
}
