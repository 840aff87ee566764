//! Date parsing shared by every pipeline phase.
//!
//! The transformer coerces with [`parse_date`], the validator flags values
//! [`parse_date`] rejects, and the loader formats with [`format_date`]. Using
//! one parser keeps "unparseable" identical across phases.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, month-first before day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y%m%d",    // 20240115
];

/// Parse a date-like string. Returns `None` for blank or unparseable input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(datetime.date());
        }
    }
    None
}

/// Canonical `YYYY-MM-DD` rendering.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Ordering of a start/end date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePairOrder {
    Valid,
    EndBeforeStart,
    StartMissing,
    EndMissing,
    BothMissing,
}

/// Compare two optional dates. Unparseable counts as missing.
pub fn validate_date_pair(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DatePairOrder {
    match (start, end) {
        (Some(start), Some(end)) if end < start => DatePairOrder::EndBeforeStart,
        (Some(_), Some(_)) => DatePairOrder::Valid,
        (None, Some(_)) => DatePairOrder::StartMissing,
        (Some(_), None) => DatePairOrder::EndMissing,
        (None, None) => DatePairOrder::BothMissing,
    }
}
