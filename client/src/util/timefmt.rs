//! Timestamp display helpers.
//!
//! The backend stores naive UTC instants (`2024-01-15T10:30:00.123456`);
//! RFC 3339 strings with an offset are also accepted. Values are shown as
//! written, without conversion to the viewer's timezone. Unparseable input
//! is returned unchanged rather than hidden.

#[cfg(test)]
#[path = "timefmt_test.rs"]
mod timefmt_test;

use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `Jan 15, 2024 10:30`
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |dt| dt.format("%b %-d, %Y %H:%M").to_string())
}

/// `Jan 15, 2024`
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |dt| dt.format("%b %-d, %Y").to_string())
}
