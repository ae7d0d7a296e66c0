//! DayKey: a calendar day on the UTC boundary.
//!
//! Every day-granular comparison in the crate (article grouping, tooltip lookup,
//! nearest-catalyst distance, price timestamps) goes through this type, so the
//! whole pipeline shares one timezone policy: UTC midnight starts the day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Naive date-time layouts accepted in addition to RFC 3339 / RFC 2822.
/// A naive value carries no offset and is read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A UTC calendar day, displayed and serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Day containing the given instant.
    pub fn from_datetime(instant: &DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// Day containing the given epoch-millisecond timestamp, if representable.
    pub fn from_timestamp_ms(ms: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| Self::from_datetime(&dt))
    }

    /// Truncate any accepted instant text to its UTC day.
    pub fn from_instant_text(text: &str) -> Option<Self> {
        parse_instant(text).map(|dt| Self::from_datetime(&dt))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Epoch milliseconds of 00:00:00 UTC on this day.
    pub fn start_ms(&self) -> i64 {
        self.0.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

/// Parse an instant from the textual forms upstream feeds produce.
///
/// Accepted, in order: RFC 3339 (`2024-01-05T23:50:00Z`), RFC 2822
/// (`Fri, 05 Jan 2024 00:00:00 GMT`), naive date-time (read as UTC), plain
/// `YYYY-MM-DD` (UTC midnight), and integer epoch milliseconds.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(ms) = text.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(ms);
    }
    None
}
