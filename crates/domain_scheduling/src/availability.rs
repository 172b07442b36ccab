//! Availability slots and search filters
//!
//! An [`Availability`] is a bookable interval owned by one therapist. The
//! [`AvailabilityFilter`] narrows a payer search by day range, time of day, or
//! to the earliest remaining day.
//!
//! Days and hours are evaluated in UTC: `morning` means a slot starting
//! between 06:00 and 12:00 UTC, and "today" is the current UTC date.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use core_kernel::{AvailabilityId, DateRange, TherapistId, TimeSlot};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::view::AvailabilityWithTherapist;

/// A bounded interval during which a therapist can be booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub therapist_id: TherapistId,
    pub slot: TimeSlot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    /// Creates a slot with a freshly generated identifier
    pub fn new(therapist_id: impl Into<TherapistId>, slot: TimeSlot) -> Self {
        let now = Utc::now();
        Self {
            id: AvailabilityId::generate(),
            therapist_id: therapist_id.into(),
            slot,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.slot.start()
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.slot.end()
    }
}

/// Orders slots by start time, then identifier
pub fn sort_chronologically(slots: &mut [Availability]) {
    slots.sort_by(|a, b| {
        a.slot
            .start()
            .cmp(&b.slot.start())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Part of the day a slot starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSegment {
    /// 06:00 to 12:00 UTC
    Morning,
    /// 12:00 to 16:00 UTC
    Afternoon,
    /// 16:00 to 20:00 UTC
    Evening,
}

impl TimeSegment {
    pub const ALL: [TimeSegment; 3] = [TimeSegment::Morning, TimeSegment::Afternoon, TimeSegment::Evening];

    /// Start hours covered by the segment, end exclusive
    pub fn hours(&self) -> Range<u32> {
        match self {
            TimeSegment::Morning => 6..12,
            TimeSegment::Afternoon => 12..16,
            TimeSegment::Evening => 16..20,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSegment::Morning => "morning",
            TimeSegment::Afternoon => "afternoon",
            TimeSegment::Evening => "evening",
        }
    }

    /// Parses a comma separated list such as `morning,evening`
    ///
    /// Blank entries are ignored and duplicates collapsed.
    pub fn parse_list(value: &str) -> Result<Vec<TimeSegment>, SchedulingError> {
        let mut segments = Vec::new();
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let segment = part.parse::<TimeSegment>()?;
            if !segments.contains(&segment) {
                segments.push(segment);
            }
        }
        Ok(segments)
    }
}

impl fmt::Display for TimeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSegment {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeSegment::Morning),
            "afternoon" => Ok(TimeSegment::Afternoon),
            "evening" => Ok(TimeSegment::Evening),
            other => Err(SchedulingError::invalid_filter(format!(
                "unknown time segment '{}', expected morning, afternoon or evening",
                other
            ))),
        }
    }
}

/// Named day ranges relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePreset {
    Today,
    Tomorrow,
    /// Sunday to Saturday around today
    ThisWeek,
    /// Sunday to Saturday around today + 7 days
    NextWeek,
}

impl DatePreset {
    /// Resolves the preset against `today`
    pub fn days(&self, today: NaiveDate) -> DateRange {
        match self {
            DatePreset::Today => single_day(today),
            DatePreset::Tomorrow => single_day(today + Duration::days(1)),
            DatePreset::ThisWeek => week_of(today),
            DatePreset::NextWeek => week_of(today + Duration::days(7)),
        }
    }
}

impl FromStr for DatePreset {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DatePreset::Today),
            "tomorrow" => Ok(DatePreset::Tomorrow),
            "this_week" => Ok(DatePreset::ThisWeek),
            "next_week" => Ok(DatePreset::NextWeek),
            other => Err(SchedulingError::invalid_filter(format!(
                "unknown date preset '{}', expected today, tomorrow, this_week, next_week or pick",
                other
            ))),
        }
    }
}

fn single_day(date: NaiveDate) -> DateRange {
    DateRange { start: date, end: date }
}

fn week_of(date: NaiveDate) -> DateRange {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Optional narrowing applied to a payer search
///
/// The default filter keeps every slot. An hour window takes precedence over
/// segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityFilter {
    /// Keep only slots starting on one of these days
    pub days: Option<DateRange>,
    /// Keep only slots starting within any of these segments; empty keeps all
    pub segments: Vec<TimeSegment>,
    /// Keep only slots whose start hour lies in this window
    pub hours: Option<Range<u32>>,
    /// Keep only the earliest day left after the other filters
    pub soonest: bool,
    /// When nothing is left, fall back to the earliest day matching the time
    /// of day criteria alone
    pub next_available: bool,
}

impl AvailabilityFilter {
    pub fn on_date(self, date: NaiveDate) -> Self {
        self.within(single_day(date))
    }

    pub fn within(mut self, days: DateRange) -> Self {
        self.days = Some(days);
        self
    }

    pub fn in_segments(mut self, segments: impl IntoIterator<Item = TimeSegment>) -> Self {
        self.segments = segments.into_iter().collect();
        self
    }

    /// Restricts start hours to `[start, end)`
    ///
    /// # Errors
    ///
    /// `SchedulingError::InvalidFilter` unless `start < end <= 24`
    pub fn between_hours(mut self, start: u32, end: u32) -> Result<Self, SchedulingError> {
        if start >= end || end > 24 {
            return Err(SchedulingError::invalid_filter(format!(
                "invalid hour window {}..{}, expected 0 <= timeStart < timeEnd <= 24",
                start, end
            )));
        }
        self.hours = Some(start..end);
        Ok(self)
    }

    pub fn soonest(mut self, soonest: bool) -> Self {
        self.soonest = soonest;
        self
    }

    pub fn next_available(mut self, next_available: bool) -> Self {
        self.next_available = next_available;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_none()
            && self.segments.is_empty()
            && self.hours.is_none()
            && !self.soonest
            && !self.next_available
    }

    /// Returns true if a single slot passes the day and time of day criteria
    pub fn matches(&self, slot: &TimeSlot) -> bool {
        if let Some(days) = &self.days {
            if !days.contains(slot.date()) {
                return false;
            }
        }
        self.matches_time_of_day(slot)
    }

    /// Returns true if the slot's start hour passes the hour window, or the
    /// segments when no window is set
    pub fn matches_time_of_day(&self, slot: &TimeSlot) -> bool {
        let hour = slot.start_hour();
        match &self.hours {
            Some(window) => window.contains(&hour),
            None => self.segments.is_empty() || self.segments.iter().any(|s| s.contains_hour(hour)),
        }
    }

    /// Applies the filter, preserving the input order
    pub fn apply(&self, items: Vec<AvailabilityWithTherapist>) -> Vec<AvailabilityWithTherapist> {
        if self.is_empty() {
            return items;
        }

        let (mut kept, rest): (Vec<_>, Vec<_>) = items.into_iter().partition(|a| self.matches(&a.slot));

        if self.soonest {
            keep_earliest_day(&mut kept);
        }

        if kept.is_empty() && self.next_available {
            kept = rest
                .into_iter()
                .filter(|a| self.matches_time_of_day(&a.slot))
                .collect();
            keep_earliest_day(&mut kept);
        }

        kept
    }
}

fn keep_earliest_day(items: &mut Vec<AvailabilityWithTherapist>) {
    if let Some(first_day) = items.iter().map(|a| a.slot.date()).min() {
        items.retain(|a| a.slot.date() == first_day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_boundaries_are_half_open() {
        assert!(TimeSegment::Morning.contains_hour(6));
        assert!(TimeSegment::Morning.contains_hour(11));
        assert!(!TimeSegment::Morning.contains_hour(12));
        assert!(TimeSegment::Afternoon.contains_hour(12));
        assert!(TimeSegment::Evening.contains_hour(19));
        assert!(!TimeSegment::Evening.contains_hour(20));
    }

    #[test]
    fn test_parse_list() {
        let segments = TimeSegment::parse_list("morning, Evening,,morning").unwrap();
        assert_eq!(segments, vec![TimeSegment::Morning, TimeSegment::Evening]);
        assert!(TimeSegment::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_unknown_segment_is_caller_error() {
        let err = TimeSegment::parse_list("brunch").unwrap_err();
        assert!(err.is_caller_error());
        assert!(err.to_string().contains("brunch"));
    }

    #[test]
    fn test_default_filter_is_empty() {
        assert!(AvailabilityFilter::default().is_empty());
        assert!(!AvailabilityFilter::default().soonest(true).is_empty());
        assert!(!AvailabilityFilter::default().next_available(true).is_empty());
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_week_presets_start_on_sunday() {
        // 2024-09-04 is a Wednesday
        let today = day(4);

        assert_eq!(DatePreset::Today.days(today), DateRange { start: day(4), end: day(4) });
        assert_eq!(DatePreset::Tomorrow.days(today), DateRange { start: day(5), end: day(5) });
        assert_eq!(DatePreset::ThisWeek.days(today), DateRange { start: day(1), end: day(7) });
        assert_eq!(DatePreset::NextWeek.days(today), DateRange { start: day(8), end: day(14) });

        // A Sunday opens its own week
        assert_eq!(DatePreset::ThisWeek.days(day(8)).start, day(8));
        // A Saturday closes it
        assert_eq!(DatePreset::ThisWeek.days(day(7)).start, day(1));
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("this_week".parse::<DatePreset>().unwrap(), DatePreset::ThisWeek);
        assert_eq!(" Tomorrow ".parse::<DatePreset>().unwrap(), DatePreset::Tomorrow);
        let err = "someday".parse::<DatePreset>().unwrap_err();
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_hour_window_overrides_segments() {
        let filter = AvailabilityFilter::default()
            .in_segments([TimeSegment::Morning])
            .between_hours(13, 15)
            .unwrap();

        assert!(filter.matches(&TimeSlot::hourly(day(2), 13).unwrap()));
        assert!(filter.matches(&TimeSlot::hourly(day(2), 14).unwrap()));
        assert!(!filter.matches(&TimeSlot::hourly(day(2), 15).unwrap()));
        assert!(!filter.matches(&TimeSlot::hourly(day(2), 9).unwrap()));
    }

    #[test]
    fn test_empty_or_out_of_range_hour_window_is_rejected() {
        assert!(AvailabilityFilter::default().between_hours(12, 12).is_err());
        assert!(AvailabilityFilter::default().between_hours(15, 9).is_err());
        assert!(AvailabilityFilter::default().between_hours(20, 25).is_err());
        assert!(AvailabilityFilter::default().between_hours(0, 24).is_ok());
    }

    #[test]
    fn test_day_range_is_inclusive() {
        let filter = AvailabilityFilter::default().within(DateRange { start: day(2), end: day(3) });

        assert!(filter.matches(&TimeSlot::hourly(day(2), 0).unwrap()));
        assert!(filter.matches(&TimeSlot::hourly(day(3), 23).unwrap()));
        assert!(!filter.matches(&TimeSlot::hourly(day(4), 0).unwrap()));
    }
}
