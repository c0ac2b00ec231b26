//! Derived assessment fields for the detail view and list rows.
//!
//! Computed on every render from the edit buffer, never stored.

#[cfg(test)]
#[path = "assessment_test.rs"]
mod assessment_test;

use std::fmt;

use crate::net::types::{LogEntry, RiskLevel, Urgency};

pub const RED: &str = "text-red-600 bg-red-100";
pub const YELLOW: &str = "text-yellow-600 bg-yellow-100";
pub const GREEN: &str = "text-green-600 bg-green-100";
pub const GREY: &str = "text-gray-600 bg-gray-100";

/// Agreement of one field across a record's entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Consensus<T> {
    /// No entries, or every entry left the field empty.
    Unknown,
    /// Every entry carries the same value.
    Uniform(T),
    /// At least two entries disagree (an empty value counts as distinct).
    Mixed,
}

impl<T: fmt::Display> fmt::Display for Consensus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Uniform(value) => fmt::Display::fmt(value, f),
            Self::Mixed => f.write_str("Mixed"),
        }
    }
}

fn consensus<'a, T: Clone + PartialEq + 'a>(values: impl IntoIterator<Item = Option<&'a T>>) -> Consensus<T> {
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Consensus::Unknown;
    };
    if values.any(|value| value != first) {
        return Consensus::Mixed;
    }
    first.cloned().map_or(Consensus::Unknown, Consensus::Uniform)
}

pub fn risk_consensus(entries: &[LogEntry]) -> Consensus<RiskLevel> {
    consensus(entries.iter().map(|entry| entry.risk_level.as_ref()))
}

pub fn urgency_consensus(entries: &[LogEntry]) -> Consensus<Urgency> {
    consensus(entries.iter().map(|entry| entry.urgency.as_ref()))
}

/// True iff every entry is airworthy; vacuously true with no entries.
pub fn overall_airworthy(entries: &[LogEntry]) -> bool {
    entries.iter().all(|entry| entry.is_airworthy)
}

pub fn risk_color(risk: Option<&RiskLevel>) -> &'static str {
    match risk {
        Some(RiskLevel::High) => RED,
        Some(RiskLevel::Medium) => YELLOW,
        Some(RiskLevel::Low) => GREEN,
        Some(RiskLevel::Other(_)) | None => GREY,
    }
}

pub fn urgency_color(urgency: Option<&Urgency>) -> &'static str {
    match urgency {
        Some(Urgency::High) => RED,
        Some(Urgency::Medium) => YELLOW,
        Some(Urgency::Normal) => GREEN,
        Some(Urgency::Other(_)) | None => GREY,
    }
}

pub fn airworthy_color(airworthy: bool) -> &'static str {
    if airworthy { GREEN } else { RED }
}

/// Colour for a derived value; `Unknown`, `Mixed` and off-scale values are grey.
pub fn consensus_color<T>(value: &Consensus<T>, color: impl Fn(Option<&T>) -> &'static str) -> &'static str {
    match value {
        Consensus::Uniform(v) => color(Some(v)),
        Consensus::Unknown | Consensus::Mixed => GREY,
    }
}

/// Text-only colour for list rows.
pub fn risk_text_color(risk: Option<&RiskLevel>) -> &'static str {
    match risk {
        Some(RiskLevel::High) => "text-red-600",
        Some(RiskLevel::Medium) => "text-yellow-600",
        Some(RiskLevel::Low) => "text-green-600",
        Some(RiskLevel::Other(_)) | None => "text-gray-400",
    }
}
