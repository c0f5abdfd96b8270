use super::models::{DisplayEvent, Event, Occurrence, END_TIME_PLACEHOLDER, LOCATION_FALLBACK};
use crate::config::{Config, DEFAULT_LOCALE};
use crate::error::AppResult;
use crate::utils::time::{
    days_inclusive, month_name, month_year, parse_api_datetime, weekday_name, DisplayZone,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

/// Clock shown for an unknown end of a recurring event
const MIDNIGHT: &str = "00:00";

/// Timezone and locale used to render display rows
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub zone: DisplayZone,
    pub locale: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            zone: DisplayZone::default(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self {
            zone: DisplayZone::new(config.display_timezone()?, &config.timezone_label()?),
            locale: config.locale.clone(),
        })
    }
}

/// Flatten events into one display row per valid occurrence.
///
/// Order follows the input: events first, then occurrences within each event.
pub fn normalize_events(events: &[Event], options: &DisplayOptions) -> Vec<DisplayEvent> {
    let mut rows = Vec::new();

    for event in events {
        let Some(event_id) = event.event_id else {
            debug!("Skipping event without event_id");
            continue;
        };
        let occurrences = match event.occurrences.as_deref() {
            Some(occurrences) if !occurrences.is_empty() => occurrences,
            _ => {
                debug!("Skipping event {} without occurrences", event_id);
                continue;
            }
        };

        rows.extend(
            occurrences
                .iter()
                .filter_map(|occurrence| normalize_occurrence(event, event_id, occurrence, options)),
        );
    }

    rows
}

/// Build the display row for one occurrence, or `None` if it must be dropped
fn normalize_occurrence(
    event: &Event,
    event_id: i64,
    occurrence: &Occurrence,
    options: &DisplayOptions,
) -> Option<DisplayEvent> {
    let occurrence_id = occurrence.occurrence_id?;
    let start = match occurrence.greg_occur_date.as_deref().and_then(parse_api_datetime) {
        Some(start) => start,
        None => {
            debug!(
                "Skipping occurrence {} of event {}: missing or invalid start",
                occurrence_id, event_id
            );
            return None;
        }
    };
    // An end before the start is treated like a missing end
    let end = occurrence
        .greg_end_date
        .as_deref()
        .and_then(parse_api_datetime)
        .filter(|end| *end >= start);

    let zone = &options.zone;
    let locale = options.locale.as_str();

    let start_day = zone.day_of(&start);
    let end_day = end.as_ref().map(|end| zone.day_of(end)).unwrap_or(start_day);

    let is_same_day = start_day == end_day;
    let is_same_month = start_day.year() == end_day.year() && start_day.month() == end_day.month();

    let date_range = if is_same_day {
        vec![start_day]
    } else {
        days_inclusive(start_day, end_day)
    };

    let is_recurring = event.is_recurring.unwrap_or(false);
    let start_time = zone.time_label(&start);
    let end_time = end
        .as_ref()
        .map(|end| zone.time_label(end))
        .unwrap_or_else(|| END_TIME_PLACEHOLDER.to_string());

    // The row stands for the first day of its range, so it always carries a time
    let time = time_display(is_recurring, &start, end.as_ref(), zone);

    let name = event
        .event_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let candidate = CandidateRow {
        id: Some(event_id),
        occurrence_id: Some(occurrence_id),
        date: Some(start_day),
        name,
    };
    let Some((id, occurrence_id, date, name)) = candidate.validate() else {
        debug!(
            "Dropping occurrence {} of event {}: incomplete row",
            occurrence_id, event_id
        );
        return None;
    };

    Some(DisplayEvent {
        id,
        occurrence_id,
        name,
        event_type: event.event_type.clone(),
        area: event.area.clone(),
        location: event
            .location
            .as_ref()
            .and_then(|location| location.location_name.clone())
            .unwrap_or_else(|| LOCATION_FALLBACK.to_string()),
        description: event.description.clone(),
        is_recurring,
        date,
        end_date: end_day,
        date_string: format_date_range(start_day, end_day, locale),
        day_of_week: day_of_week_label(start_day, end_day, locale),
        date_range,
        is_same_day,
        is_same_month,
        start_time,
        end_time,
        time,
    })
}

/// Fields every row must carry before it is emitted
struct CandidateRow {
    id: Option<i64>,
    occurrence_id: Option<i64>,
    date: Option<NaiveDate>,
    name: Option<String>,
}

impl CandidateRow {
    fn validate(self) -> Option<(i64, i64, NaiveDate, String)> {
        Some((self.id?, self.occurrence_id?, self.date?, self.name?))
    }
}

/// Human-readable date range.
///
/// - single day: `1 Maret 2024`
/// - same month: `1 - 3 Maret 2024`
/// - across months: `30 Maret 2024 - 2 April 2024`
pub fn format_date_range(start: NaiveDate, end: NaiveDate, locale: &str) -> String {
    if start == end {
        return format!("{} {}", start.day(), month_year(&start, locale));
    }

    if start.year() == end.year() && start.month() == end.month() {
        return format!("{} - {} {}", start.day(), end.day(), month_year(&start, locale));
    }

    format!(
        "{} {} - {} {}",
        start.day(),
        month_year(&start, locale),
        end.day(),
        month_year(&end, locale)
    )
}

/// Weekday of the start, or `start - end` weekdays for a range
pub fn day_of_week_label(start: NaiveDate, end: NaiveDate, locale: &str) -> String {
    if start == end {
        weekday_name(start.weekday(), locale)
    } else {
        format!(
            "{} - {}",
            weekday_name(start.weekday(), locale),
            weekday_name(end.weekday(), locale)
        )
    }
}

/// Time label for the first day of an occurrence
fn time_display(
    is_recurring: bool,
    start: &DateTime<Utc>,
    end: Option<&DateTime<Utc>>,
    zone: &DisplayZone,
) -> String {
    if is_recurring {
        let end_clock = end
            .map(|end| zone.clock(end))
            .unwrap_or_else(|| MIDNIGHT.to_string());
        format!("{} - {} {}", zone.clock(start), end_clock, zone.label)
    } else {
        zone.time_label(start)
    }
}

/// Short `"{day} {Month}"` label, used by list output
pub fn short_date(date: NaiveDate, locale: &str) -> String {
    format!("{} {}", date.day(), month_name(date.month(), locale))
}
