use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The "today" an aggregation pass is computed for.
///
/// `day` is the number of elapsed days in the month. Day 0 is the first
/// moment of the month, before any day has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ReferenceDateParts")]
pub struct ReferenceDate {
    year: i32,
    month: u32,
    day: u32,
}

impl ReferenceDate {
    /// Validate and build a reference date.
    /// Rejects months outside 1..=12 and days past the end of the month.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::ValidationError(format!(
                "Invalid month {month}: must be between 1 and 12"
            )));
        }
        let length = month_length(year, month).ok_or_else(|| {
            CoreError::ValidationError(format!("Year {year} is out of the supported date range"))
        })?;
        if day > length {
            return Err(CoreError::ValidationError(format!(
                "Invalid day {day}: {year}-{month:02} has only {length} days"
            )));
        }
        Ok(Self { year, month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Reference date for the current UTC day.
    pub fn today() -> Self {
        Self::from_date(chrono::Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Number of days in the reference month (28..=31).
    pub fn days_in_month(&self) -> u32 {
        // `new`/`from_date` already proved the month exists
        month_length(self.year, self.month).unwrap_or(30)
    }

    /// Whether `date` falls in the reference month.
    pub fn same_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Whether `date` is in the reference month and on or before the reference day.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.same_month(date) && date.day() <= self.day
    }

    /// The calendar date of the reference day, `None` on day 0.
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl std::fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Unvalidated wire form, checked through [`ReferenceDate::new`] on deserialize.
#[derive(Deserialize)]
struct ReferenceDateParts {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<ReferenceDateParts> for ReferenceDate {
    type Error = CoreError;

    fn try_from(parts: ReferenceDateParts) -> Result<Self, Self::Error> {
        ReferenceDate::new(parts.year, parts.month, parts.day)
    }
}

fn month_length(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
