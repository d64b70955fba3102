//! Timestamp parsing and formatting.
//!
//! Exports from InfluxDB carry RFC 3339 instants (`2025-03-01T10:00:00Z`),
//! Grafana writes local wall-clock times (`2025-03-01 10:00:00`) or Unix
//! epoch milliseconds. All of them become naive UTC date-times; values with
//! an explicit offset are shifted to UTC, values without one are taken as is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Wall-clock formats without an offset, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Formats carrying a numeric UTC offset.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Date-only formats; the time defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Output format used when a timestamp is written back out.
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Shorter digit runs are not treated as epoch values.
const EPOCH_MIN_DIGITS: usize = 9;

/// Epoch values with at least this many digits are read as milliseconds.
const EPOCH_MILLIS_MIN_DIGITS: usize = 12;

/// Parses a single timestamp cell.
///
/// Returns `None` for empty or unrecognized values.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    if let Some(utc) = trimmed.strip_suffix(['Z', 'z']) {
        return parse_naive(utc);
    }
    if let Some(parsed) = parse_naive(trimmed) {
        return Some(parsed);
    }
    if let Some(parsed) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(parsed.naive_utc());
    }
    parse_epoch(trimmed)
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_epoch(value: &str) -> Option<NaiveDateTime> {
    if value.len() < EPOCH_MIN_DIGITS || !value.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let number: i64 = value.parse().ok()?;
    let parsed = if value.len() >= EPOCH_MILLIS_MIN_DIGITS {
        DateTime::from_timestamp_millis(number)?
    } else {
        DateTime::from_timestamp(number, 0)?
    };
    Some(parsed.naive_utc())
}

/// Formats a timestamp the way it is exported; the fraction is omitted when zero.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(OUTPUT_FORMAT).to_string()
}
