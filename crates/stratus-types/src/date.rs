//! Normalized calendar days for observation keys.

use core::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::ParseError;

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A calendar day with time-of-day stripped, stored as a Julian day
/// number.
///
/// Observations are keyed by day, so two fetches on the same day must
/// collapse to the same value regardless of when they ran. Comparing or
/// joining on the day number can never be split by intra-day time
/// differences.
///
/// # Example
///
/// ```
/// use stratus_types::ForecastDate;
///
/// let day = ForecastDate::parse("2024-01-03")?;
/// assert_eq!(day.to_string(), "2024-01-03");
/// assert!(day > ForecastDate::parse("2024-01-02")?);
/// # Ok::<(), stratus_types::ParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastDate(i64);

impl ForecastDate {
    /// Normalize a calendar date to a forecast day.
    pub fn from_date(date: Date) -> Self {
        Self(i64::from(date.to_julian_day()))
    }

    /// Reconstruct from a raw day number, as read back from storage.
    pub fn from_day_number(day: i64) -> Self {
        Self(day)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Date::parse(s, DAY_FORMAT)
            .map(Self::from_date)
            .map_err(|_| ParseError::InvalidDate(s.to_string()))
    }

    /// The raw day number used as the storage and join key.
    pub fn day_number(self) -> i64 {
        self.0
    }

    /// The calendar date, if the day number is within `time`'s range.
    pub fn to_date(self) -> Option<Date> {
        i32::try_from(self.0)
            .ok()
            .and_then(|day| Date::from_julian_day(day).ok())
    }
}

impl From<Date> for ForecastDate {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_date().and_then(|d| d.format(DAY_FORMAT).ok()) {
            Some(s) => f.write_str(&s),
            None => write!(f, "day#{}", self.0),
        }
    }
}
