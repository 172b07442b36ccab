//! Time slot and calendar range types
//!
//! All instants are stored and compared in UTC. A [`TimeSlot`] is the
//! half-open interval `[start, end)` of a bookable appointment; a
//! [`DateRange`] is an inclusive run of calendar days used when planning slots.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid hour of day: {0}")]
    InvalidHour(u32),
}

/// A bounded appointment interval, start inclusive and end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted intervals
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a slot of the given length
    pub fn with_duration(start: DateTime<Utc>, length: Duration) -> Result<Self, TemporalError> {
        Self::new(start, start + length)
    }

    /// Creates a one hour slot starting at `hour:00` UTC on `date`
    pub fn hourly(date: NaiveDate, hour: u32) -> Result<Self, TemporalError> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or(TemporalError::InvalidHour(hour))?;
        let start = date.and_time(time).and_utc();
        Self::with_duration(start, Duration::hours(1))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar day (UTC) on which the slot starts
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Hour of day (UTC) at which the slot starts
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the range of `days` consecutive days beginning `offset_days` after `today`
    pub fn following(today: NaiveDate, offset_days: u32, days: u32) -> Result<Self, TemporalError> {
        let start = today + Duration::days(i64::from(offset_days));
        let end = start + Duration::days(i64::from(days.max(1)) - 1);
        Self::new(start, end)
    }

    /// Returns true if `date` lies inside the range, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, both ends included
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates over every day in the range
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Returns the UTC instants `[first midnight, midnight after the last day)`
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let lower = self.start.and_time(NaiveTime::MIN).and_utc();
        let upper = (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
        (lower, upper)
    }
}
