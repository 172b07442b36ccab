//! Unit tests for the Temporal module
//!
//! Tests cover TimeSlot construction and queries, DateRange iteration, and
//! the ISO-8601 round trip of slot instants.

use core_kernel::{DateRange, TemporalError, TimeSlot};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

mod time_slot {
    use super::*;

    #[test]
    fn test_new_creates_slot() {
        let slot = TimeSlot::new(at(3, 9), at(3, 10)).unwrap();
        assert_eq!(slot.start(), at(3, 9));
        assert_eq!(slot.end(), at(3, 10));
        assert_eq!(slot.duration(), Duration::hours(1));
    }

    #[test]
    fn test_new_fails_when_end_not_after_start() {
        assert!(matches!(
            TimeSlot::new(at(3, 10), at(3, 9)),
            Err(TemporalError::InvalidPeriod { .. })
        ));
        assert!(TimeSlot::new(at(3, 10), at(3, 10)).is_err());
    }

    #[test]
    fn test_date_and_hour_are_utc() {
        let slot = TimeSlot::new(at(4, 23), at(5, 0)).unwrap();
        assert_eq!(slot.date(), NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(slot.start_hour(), 23);
    }
}

mod date_range {
    use super::*;

    #[test]
    fn test_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(TemporalError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 25).unwrap();
        let range = DateRange::following(today, 4, 11).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 11);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
        assert_eq!(days[10], NaiveDate::from_ymd_opt(2024, 7, 9).unwrap());
    }

    #[test]
    fn test_utc_bounds_cover_whole_days() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let range = DateRange::new(day, day).unwrap();
        let (lower, upper) = range.utc_bounds();
        assert_eq!(lower, at(3, 0));
        assert_eq!(upper, at(4, 0));
        assert!(range.contains(day));
        assert!(!range.contains(day.succ_opt().unwrap()));
    }
}

proptest! {
    #[test]
    fn prop_slot_instants_roundtrip_through_rfc3339(secs in 0i64..4_000_000_000i64, minutes in 1i64..600) {
        let start = Utc.timestamp_opt(secs, 0).unwrap();
        let slot = TimeSlot::with_duration(start, Duration::minutes(minutes)).unwrap();

        let encoded = serde_json::to_value(slot.start()).unwrap();
        let decoded: DateTime<Utc> = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(decoded, slot.start());

        let parsed = DateTime::parse_from_rfc3339(&slot.end().to_rfc3339()).unwrap();
        prop_assert_eq!(parsed.with_timezone(&Utc), slot.end());
    }
}
