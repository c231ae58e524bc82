//! Calendar-day handling shared by the streak calculator and the ranking engine.
//!
//! Every day is carried as a zero-padded `YYYY-MM-DD` string. Because the
//! representation is fixed-width with the most significant field first,
//! lexicographic order on the text is chronological order, and range filters
//! compare [`ActivityDate`] values directly instead of doing calendar math.

mod windows;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::shared::DomainError;

pub use windows::PeriodWindows;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// A validated calendar day in `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityDate {
    // Field order matters for the derived Ord: text first.
    text: String,
    day: NaiveDate,
}

impl ActivityDate {
    /// Parse a zero-padded `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.len() != DATE_LEN {
            return Err(DomainError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD",
                s
            )));
        }

        let day = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| DomainError::Validation(format!("Invalid date '{}': {}", s, e)))?;

        // chrono tolerates unpadded numeric fields; only the canonical
        // rendering is allowed through.
        let text = day.format(DATE_FORMAT).to_string();
        if text != s {
            return Err(DomainError::Validation(format!(
                "Invalid date '{}': not zero-padded",
                s
            )));
        }

        Ok(Self { text, day })
    }

    pub fn from_naive(day: NaiveDate) -> Result<Self, DomainError> {
        let text = day.format(DATE_FORMAT).to_string();
        if text.len() != DATE_LEN {
            return Err(DomainError::Validation(format!(
                "Date {} is outside the four-digit year range",
                text
            )));
        }
        Ok(Self { text, day })
    }

    /// The UTC calendar day of `now`.
    pub fn utc_today(now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::from_naive(now.date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_naive(&self) -> NaiveDate {
        self.day
    }

    /// `YYYY` prefix.
    pub fn year_str(&self) -> &str {
        &self.text[..4]
    }

    /// `YYYY-MM` prefix.
    pub fn year_month_str(&self) -> &str {
        &self.text[..7]
    }

    /// The following day, or `None` past year 9999.
    pub fn succ(&self) -> Option<Self> {
        self.offset(1)
    }

    /// The preceding day, or `None` before year 0.
    pub fn pred(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn offset(&self, days: i64) -> Option<Self> {
        let day = self.day.checked_add_signed(Duration::days(days))?;
        Self::from_naive(day).ok()
    }
}

impl fmt::Display for ActivityDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ActivityDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActivityDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ActivityDate> for String {
    fn from(value: ActivityDate) -> Self {
        value.text
    }
}

/// Today's calendar day in the given IANA timezone.
///
/// Unknown zone names fall back to UTC.
pub fn today_in_timezone(timezone: &str, now: DateTime<Utc>) -> Result<ActivityDate, DomainError> {
    match timezone.parse::<Tz>() {
        Ok(tz) => ActivityDate::from_naive(now.with_timezone(&tz).date_naive()),
        Err(e) => {
            warn!(timezone = %timezone, error = %e, "unknown timezone, using UTC");
            ActivityDate::utc_today(now)
        }
    }
}
