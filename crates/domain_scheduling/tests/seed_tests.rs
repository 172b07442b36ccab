//! Tests for the reference data set and the random slot planner

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use core_kernel::TherapistId;
use domain_scheduling::{reference_data, SlotPlanConfig, SlotPlanner};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 28).unwrap()
}

mod reference {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let data = reference_data();
        let payers: HashSet<_> = data.payers.iter().map(|p| p.id.clone()).collect();
        let therapists: HashSet<_> = data.therapists.iter().map(|t| t.id.clone()).collect();
        let links: HashSet<_> = data.assignments.iter().map(|a| a.key()).collect();

        assert_eq!(payers.len(), data.payers.len());
        assert_eq!(therapists.len(), data.therapists.len());
        assert_eq!(links.len(), data.assignments.len());
    }

    #[test]
    fn test_assignments_reference_existing_rows() {
        let data = reference_data();
        for link in &data.assignments {
            assert!(data.payers.iter().any(|p| p.id == link.insurance_payer_id));
            assert!(data.therapists.iter().any(|t| t.id == link.therapist_id));
        }
    }

    #[test]
    fn test_every_therapist_accepts_a_payer() {
        let data = reference_data();
        for therapist in &data.therapists {
            assert!(data.assignments.iter().any(|a| a.therapist_id == therapist.id));
        }
    }
}

mod planner {
    use super::*;

    #[test]
    fn test_window_starts_four_days_out() {
        let window = SlotPlanConfig::default().window(today()).unwrap();
        assert_eq!(window.start, today() + Duration::days(4));
        assert_eq!(window.len_days(), 11);
    }

    #[test]
    fn test_same_seed_same_hours() {
        let therapists = vec![TherapistId::new("t1"), TherapistId::new("t2")];
        let window = SlotPlanConfig::default().window(today()).unwrap();

        let plan = |seed| {
            let mut planner = SlotPlanner::new(SlotPlanConfig::default(), StdRng::seed_from_u64(seed));
            planner
                .plan(&therapists, &window)
                .unwrap()
                .into_iter()
                .map(|a| (a.therapist_id, a.slot))
                .collect::<Vec<_>>()
        };

        assert_eq!(plan(42), plan(42));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_plan_respects_bounds(seed in any::<u64>()) {
        let config = SlotPlanConfig::default();
        let window = config.window(today()).unwrap();
        let therapists = reference_data().therapist_ids();
        let mut planner = SlotPlanner::new(config.clone(), StdRng::seed_from_u64(seed));

        let slots = planner.plan(&therapists, &window).unwrap();

        let mut per_day: HashMap<(TherapistId, NaiveDate), Vec<u32>> = HashMap::new();
        for slot in &slots {
            prop_assert_eq!(slot.slot.duration(), Duration::hours(1));
            prop_assert!(window.contains(slot.slot.date()));
            prop_assert!(config.candidate_hours.contains(&slot.slot.start_hour()));
            per_day
                .entry((slot.therapist_id.clone(), slot.slot.date()))
                .or_default()
                .push(slot.slot.start_hour());
        }

        prop_assert_eq!(per_day.len(), therapists.len() * 11);
        for hours in per_day.values() {
            prop_assert!((4..=8).contains(&hours.len()));
            let distinct: HashSet<_> = hours.iter().collect();
            prop_assert_eq!(distinct.len(), hours.len());
            prop_assert!(hours.windows(2).all(|w| w[0] < w[1]));
        }

        let ids: HashSet<_> = slots.iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(ids.len(), slots.len());
    }
}
