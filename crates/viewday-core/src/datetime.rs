//! Date classification and wall-clock arithmetic for event times.
//!
//! End timestamps are computed on wall-clock components
//! (`NaiveDateTime` plus a minute count), never through UTC-offset math,
//! so adding a duration cannot shift the calendar day under DST or
//! timezone offsets.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike};

/// A raw date value is all-day when it carries no time separator.
pub fn is_all_day(raw: &str) -> bool {
    !raw.contains('T')
}

const TIMED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a timed start value into wall-clock components. An explicit
/// offset, when present, is kept as the author wrote it rather than
/// converted to UTC.
pub fn parse_start(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in TIMED_FORMATS {
        if let Ok(start) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(start);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_local())
}

/// End of a timed event: start plus a positive minute count. `None` when
/// the start is unparseable or the duration is non-positive; the surface
/// then renders the event as point-in-time or default-duration.
pub fn end_of(raw_start: &str, duration_minutes: f64) -> Option<String> {
    if duration_minutes <= 0.0 || !duration_minutes.is_finite() {
        return None;
    }
    let start = parse_start(raw_start)?;
    let end = start.checked_add_signed(Duration::seconds((duration_minutes * 60.0).round() as i64))?;
    Some(format_wall_clock(end))
}

fn format_wall_clock(value: NaiveDateTime) -> String {
    if value.second() == 0 {
        value.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
