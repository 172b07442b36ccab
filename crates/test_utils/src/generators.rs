//! Property-Based Test Generators
//!
//! proptest strategies for scheduling values.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use core_kernel::TimeSlot;
use domain_scheduling::{AvailabilityFilter, TimeSegment};
use proptest::prelude::*;

/// Instants between 2020 and 2030, whole seconds
pub fn utc_timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap())
    })
}

/// Slots lasting 15 minutes to 4 hours
pub fn time_slot_strategy() -> impl Strategy<Value = TimeSlot> {
    (utc_timestamp_strategy(), 15i64..=240).prop_map(|(start, minutes)| {
        TimeSlot::with_duration(start, Duration::minutes(minutes)).unwrap()
    })
}

/// Days in September 2024, around the fixed planning window
pub fn planning_day_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=30).prop_map(|day| NaiveDate::from_ymd_opt(2024, 9, day).unwrap())
}

pub fn segment_strategy() -> impl Strategy<Value = TimeSegment> {
    prop_oneof![
        Just(TimeSegment::Morning),
        Just(TimeSegment::Afternoon),
        Just(TimeSegment::Evening),
    ]
}

/// Start-hour windows `[start, end)` within a day
pub fn hour_window_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24).prop_flat_map(|start| (Just(start), start + 1..=24))
}

/// Any combination of a picked day, segments, an hour window and `soonest`
pub fn filter_strategy() -> impl Strategy<Value = AvailabilityFilter> {
    (
        proptest::option::of(planning_day_strategy()),
        proptest::collection::vec(segment_strategy(), 0..3),
        proptest::option::of(hour_window_strategy()),
        any::<bool>(),
    )
        .prop_map(|(date, segments, hours, soonest)| {
            let mut filter = AvailabilityFilter::default().in_segments(segments).soonest(soonest);
            if let Some(date) = date {
                filter = filter.on_date(date);
            }
            if let Some((start, end)) = hours {
                if let Ok(windowed) = filter.clone().between_hours(start, end) {
                    filter = windowed;
                }
            }
            filter
        })
}

/// Display names that sort in interesting ways, ties included
pub fn payer_name_strategy() -> impl Strategy<Value = String> {
    "[A-D][a-c ]{0,3}"
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_hour_windows_are_accepted((start, end) in hour_window_strategy()) {
            prop_assert!(AvailabilityFilter::default().between_hours(start, end).is_ok());
        }

        #[test]
        fn prop_generated_slots_are_positive(slot in time_slot_strategy()) {
            prop_assert!(slot.start() < slot.end());
            prop_assert!(slot.duration() <= Duration::hours(4));
        }
    }
}
