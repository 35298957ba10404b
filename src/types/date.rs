//! Event dates.
//!
//! Content records carry dates in whatever shape the author typed: a bare
//! calendar day (`2024-05-02`), a local timestamp without offset
//! (`2024-05-02T18:30:00`), or a full RFC 3339 timestamp. All of them are
//! pinned to a UTC instant on parse so comparisons are total.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a date string matches none of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable event date: {input:?}")]
pub struct DateParseError {
    /// The rejected input.
    pub input: String,
}

/// Calendar timestamp of an event, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate(DateTime<Utc>);

impl EventDate {
    /// Wrap an instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Midnight UTC on the given calendar day, if the day exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }

    /// Parse any accepted date shape.
    ///
    /// Naive timestamps and bare days are interpreted as UTC.
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(dt.and_utc()));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
            .ok_or_else(|| DateParseError { input: input.to_string() })
    }

    /// The UTC instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for EventDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for EventDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
