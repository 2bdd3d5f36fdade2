//! Publication date parsing and Portuguese `d MMM yy` formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 style `published_at` value.
///
/// Timestamps carrying an offset are normalized to UTC; naive timestamps and
/// bare dates are taken as given.
pub fn parse_published_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.naive_utc());
    }
    // RFC 3339 wants `+hh:mm` and seconds; ISO-8601 also allows `+hhmm`,
    // and a `Z` suffix on minute-precision times.
    let with_offset = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+0000"),
        None => value.to_string(),
    };
    for format in OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(&with_offset, format) {
            return Some(instant.naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format a timestamp as `d MMM yy`, e.g. `10 mai 21`.
pub fn format_pt_short(timestamp: &NaiveDateTime) -> String {
    let month = MONTHS_PT[timestamp.month0() as usize];
    format!("{} {} {:02}", timestamp.day(), month, timestamp.year().rem_euclid(100))
}

/// Parse and format in one step; `None` when the input is not a date.
pub fn format_published_at(value: &str) -> Option<String> {
    parse_published_at(value).map(|timestamp| format_pt_short(&timestamp))
}
