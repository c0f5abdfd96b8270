use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use rust_i18n::t;

/// Label appended to clock times in the default display zone (UTC+7)
pub const DEFAULT_ZONE_LABEL: &str = "WIB";

/// Timezone and suffix label used to render clock times
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayZone {
    pub tz: Tz,
    pub label: String,
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Etc::GMTMinus7,
            label: DEFAULT_ZONE_LABEL.to_string(),
        }
    }
}

impl DisplayZone {
    pub fn new(tz: Tz, label: &str) -> Self {
        Self {
            tz,
            label: label.to_string(),
        }
    }

    /// Convert a UTC instant to this zone
    pub fn localize(&self, dt: &DateTime<Utc>) -> DateTime<Tz> {
        dt.with_timezone(&self.tz)
    }

    /// Calendar day of an instant in this zone
    pub fn day_of(&self, dt: &DateTime<Utc>) -> NaiveDate {
        self.localize(dt).date_naive()
    }

    /// Clock time `HH:MM` in this zone
    pub fn clock(&self, dt: &DateTime<Utc>) -> String {
        self.localize(dt).format("%H:%M").to_string()
    }

    /// Clock time with the zone label, e.g. `17:00 WIB`
    pub fn time_label(&self, dt: &DateTime<Utc>) -> String {
        format!("{} {}", self.clock(dt), self.label)
    }
}

/// Parse a datetime as sent by the API.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` with a `T` or a space
/// (read as UTC), and a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_api_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format a date for query parameters (`yyyy-MM-dd`)
pub fn query_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Every calendar day from `start` to `end`, both inclusive
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return vec![start];
    }
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Localized month name
pub fn month_name(month: u32, locale: &str) -> String {
    let name = match month {
        1 => t!("month.january", locale = locale),
        2 => t!("month.february", locale = locale),
        3 => t!("month.march", locale = locale),
        4 => t!("month.april", locale = locale),
        5 => t!("month.may", locale = locale),
        6 => t!("month.june", locale = locale),
        7 => t!("month.july", locale = locale),
        8 => t!("month.august", locale = locale),
        9 => t!("month.september", locale = locale),
        10 => t!("month.october", locale = locale),
        11 => t!("month.november", locale = locale),
        _ => t!("month.december", locale = locale),
    };
    name.to_string()
}

/// Localized weekday name
pub fn weekday_name(weekday: Weekday, locale: &str) -> String {
    let name = match weekday {
        Weekday::Mon => t!("weekday.monday", locale = locale),
        Weekday::Tue => t!("weekday.tuesday", locale = locale),
        Weekday::Wed => t!("weekday.wednesday", locale = locale),
        Weekday::Thu => t!("weekday.thursday", locale = locale),
        Weekday::Fri => t!("weekday.friday", locale = locale),
        Weekday::Sat => t!("weekday.saturday", locale = locale),
        Weekday::Sun => t!("weekday.sunday", locale = locale),
    };
    name.to_string()
}

/// `"{Month} {Year}"`, e.g. `Maret 2024`
pub fn month_year(date: &NaiveDate, locale: &str) -> String {
    format!("{} {}", month_name(date.month(), locale), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_datetime() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_api_datetime("2024-03-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_api_datetime("2024-03-01T17:00:00+07:00"), Some(expected));
        assert_eq!(parse_api_datetime("2024-03-01T10:00:00.000"), Some(expected));
        assert_eq!(parse_api_datetime("2024-03-01 10:00:00"), Some(expected));
        assert_eq!(parse_api_datetime("2024-03-01T10:00"), Some(expected));
        assert_eq!(parse_api_datetime("2024-03-01 10:00"), Some(expected));
        assert_eq!(
            parse_api_datetime("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );

        // Invalid cases
        assert_eq!(parse_api_datetime(""), None);
        assert_eq!(parse_api_datetime("not a date"), None);
        assert_eq!(parse_api_datetime("2024-13-01"), None);
    }

    #[test]
    fn test_display_zone_labels() {
        let zone = DisplayZone::default();
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 0).unwrap();

        assert_eq!(zone.clock(&dt), "17:05");
        assert_eq!(zone.time_label(&dt), "17:05 WIB");

        // 20:00 UTC is already the next day in WIB
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(zone.day_of(&late), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_default_zone_is_fixed_offset() {
        let zone = DisplayZone::default();

        // Asia/Jakarta was +07:30 in 1960; the display zone stays at +07:00
        let old = Utc.with_ymd_and_hms(1960, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(zone.time_label(&old), "17:00 WIB");

        let old_late = Utc.with_ymd_and_hms(1955, 6, 30, 16, 45, 0).unwrap();
        assert_eq!(zone.day_of(&old_late), NaiveDate::from_ymd_opt(1955, 6, 30).unwrap());
    }

    #[test]
    fn test_days_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days = days_inclusive(start, end);
        assert_eq!(days.len(), 3);
        assert_eq!(days[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert_eq!(days_inclusive(start, start), vec![start]);
        assert_eq!(days_inclusive(end, start), vec![end]);
    }

    #[test]
    fn test_localized_names() {
        assert_eq!(month_name(3, "id"), "Maret");
        assert_eq!(month_name(3, "en"), "March");
        assert_eq!(weekday_name(Weekday::Fri, "id"), "Jumat");
        assert_eq!(
            month_year(&NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(), "id"),
            "Agustus 2024"
        );
    }

    #[test]
    fn test_query_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(query_date(&date), "2024-01-05");
    }
}
