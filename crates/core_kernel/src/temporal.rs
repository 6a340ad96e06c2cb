//! Calendar-date handling
//!
//! Finance schedules work on calendar dates only. Due dates and paid dates are
//! stored as `YYYY-MM-DD`; anything carrying a time of day is truncated to its
//! date before any arithmetic, so ages are always whole days.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// ISO calendar date format used for due and paid dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timezone wrapper used to decide what "today" is for the brokerage
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the calendar date of a UTC instant in this timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to calendar-date handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Empty date value")]
    EmptyDate,

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
}

/// Parses a stored calendar date
///
/// Accepts `YYYY-MM-DD` and ISO date-times such as `2024-03-01T10:15:00Z`,
/// in which case only the date part is kept.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TemporalError::EmptyDate);
    }

    let date_part = match trimmed.char_indices().nth(10) {
        Some((idx, 'T')) | Some((idx, ' ')) => &trimmed[..idx],
        _ => trimmed,
    };

    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT)
        .map_err(|_| TemporalError::InvalidDate(value.to_string()))
}

/// Signed number of whole days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Signed number of whole days between two instants, each truncated to midnight
pub fn days_between_at(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    days_between(from.date(), to.date())
}
