//! Pre-built Test Fixtures
//!
//! Fixed dates and a seeded in-memory store, so tests see the same data on
//! every run.

use chrono::NaiveDate;
use core_kernel::DateRange;
use domain_scheduling::{
    reference_data, Availability, MockSchedulingPort, ReferenceData, SlotPlanConfig, SlotPlanner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixture for dates and instants
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The "today" all planned data is relative to (Sunday, Sep 1 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date")
    }

    /// First day of the default planning window
    pub fn first_planned_day() -> NaiveDate {
        Self::planning_window().start
    }

    pub fn planning_window() -> DateRange {
        SlotPlanConfig::default()
            .window(Self::today())
            .expect("default plan has a valid window")
    }
}

/// Fixture for the fixed reference data and deterministic slot plans
pub struct SchedulingFixtures;

impl SchedulingFixtures {
    pub fn reference() -> ReferenceData {
        reference_data()
    }

    /// The default plan for every reference therapist, drawn from `seed`
    pub fn planned_slots(seed: u64) -> Vec<Availability> {
        let data = reference_data();
        let mut planner = SlotPlanner::new(SlotPlanConfig::default(), StdRng::seed_from_u64(seed));
        planner
            .plan(&data.therapist_ids(), &TemporalFixtures::planning_window())
            .expect("default plan is valid")
    }

    /// An in-memory store holding the reference data and a seeded plan
    pub async fn seeded_port(seed: u64) -> MockSchedulingPort {
        let port = MockSchedulingPort::with_reference_data(&reference_data()).await;
        port.insert_availabilities(Self::planned_slots(seed)).await;
        port
    }
}

/// Payer identifiers of the reference data
pub struct PayerFixtures;

impl PayerFixtures {
    pub const BLUECROSS: &'static str = "bluecross";
    pub const CIGNA: &'static str = "cigna";
    /// Not part of the reference data
    pub const UNKNOWN: &'static str = "acme-health";
}
