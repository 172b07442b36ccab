//! Reference data and availability planning for the seeder
//!
//! The reference set is fixed: seven payers, sixteen therapists, and a fixed
//! assignment of payers to therapists. Availability is randomized: for each
//! therapist and each day of the planning window, a random number of distinct
//! hours is drawn from the candidate hours and one slot is created per hour.

use chrono::NaiveDate;
use core_kernel::{DateRange, TemporalError, TherapistId, TimeSlot};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::availability::Availability;
use crate::payer::InsurancePayer;
use crate::therapist::{Therapist, TherapistInsurance};

const PAYERS: &[(&str, &str)] = &[
    ("bluecross", "Blue Cross Blue Shield"),
    ("aetna", "Aetna"),
    ("cigna", "Cigna"),
    ("medicaid", "Medicaid"),
    ("united", "United Healthcare"),
    ("kaiser", "Kaiser Permanente"),
    ("humana", "Humana"),
];

const THERAPIST_COUNT: usize = 16;

const PAYER_ASSIGNMENTS: &[(&str, &[&str])] = &[
    ("t1", &["aetna", "kaiser"]),
    ("t2", &["aetna", "medicaid"]),
    ("t3", &["bluecross", "aetna"]),
    ("t4", &["bluecross", "cigna"]),
    ("t5", &["aetna", "cigna", "united"]),
    ("t6", &["bluecross", "aetna"]),
    ("t7", &["bluecross", "aetna", "cigna", "united"]),
    ("t8", &["aetna", "cigna"]),
    ("t9", &["aetna", "cigna", "humana"]),
    ("t10", &["aetna", "cigna", "medicaid"]),
    ("t11", &["aetna"]),
    ("t12", &["cigna", "united"]),
    ("t13", &["cigna"]),
    ("t14", &["kaiser", "cigna"]),
    ("t15", &["medicaid", "bluecross"]),
    ("t16", &["aetna", "bluecross", "cigna", "united"]),
];

/// The fixed rows inserted by every seeding run
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub payers: Vec<InsurancePayer>,
    pub therapists: Vec<Therapist>,
    pub assignments: Vec<TherapistInsurance>,
}

impl ReferenceData {
    /// Identifiers of the therapists accepting a payer
    pub fn therapists_accepting(&self, payer: &str) -> Vec<TherapistId> {
        self.assignments
            .iter()
            .filter(|a| a.insurance_payer_id.as_str() == payer)
            .map(|a| a.therapist_id.clone())
            .collect()
    }

    pub fn therapist_ids(&self) -> Vec<TherapistId> {
        self.therapists.iter().map(|t| t.id.clone()).collect()
    }
}

/// Builds the fixed payers, therapists and assignments
pub fn reference_data() -> ReferenceData {
    let payers = PAYERS
        .iter()
        .map(|(id, name)| InsurancePayer::new(*id, *name))
        .collect();

    let therapists = (1..=THERAPIST_COUNT)
        .map(|n| Therapist::new(format!("t{}", n), format!("Dr. Therapist {}", n)))
        .collect();

    let assignments = PAYER_ASSIGNMENTS
        .iter()
        .flat_map(|(therapist, payers)| {
            payers
                .iter()
                .map(move |payer| TherapistInsurance::new(*therapist, *payer))
        })
        .collect();

    ReferenceData {
        payers,
        therapists,
        assignments,
    }
}

/// Parameters of the random availability plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlanConfig {
    /// Days between today and the first planned day
    pub start_offset_days: u32,
    /// Number of consecutive planned days
    pub days: u32,
    pub min_slots_per_day: usize,
    pub max_slots_per_day: usize,
    /// Start hours (UTC) slots may be placed at
    pub candidate_hours: Vec<u32>,
}

impl Default for SlotPlanConfig {
    fn default() -> Self {
        Self {
            start_offset_days: 4,
            days: 11,
            min_slots_per_day: 4,
            max_slots_per_day: 8,
            candidate_hours: (9..=17).collect(),
        }
    }
}

impl SlotPlanConfig {
    /// The planned days, relative to `today`
    pub fn window(&self, today: NaiveDate) -> Result<DateRange, TemporalError> {
        DateRange::following(today, self.start_offset_days, self.days)
    }
}

/// Draws random one hour slots according to a [`SlotPlanConfig`]
pub struct SlotPlanner<R> {
    config: SlotPlanConfig,
    rng: R,
}

impl<R: Rng> SlotPlanner<R> {
    pub fn new(config: SlotPlanConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SlotPlanConfig {
        &self.config
    }

    /// Plans one day for one therapist; hours are distinct and ascending
    pub fn plan_day(
        &mut self,
        therapist_id: &TherapistId,
        date: NaiveDate,
    ) -> Result<Vec<Availability>, TemporalError> {
        let available = self.config.candidate_hours.len();
        let max = self.config.max_slots_per_day.min(available);
        let min = self.config.min_slots_per_day.min(max);
        let count = self.rng.gen_range(min..=max);

        let mut hours: Vec<u32> = self
            .config
            .candidate_hours
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        hours.sort_unstable();

        hours
            .into_iter()
            .map(|hour| Ok(Availability::new(therapist_id.clone(), TimeSlot::hourly(date, hour)?)))
            .collect()
    }

    /// Plans every day of `window` for each therapist
    pub fn plan(
        &mut self,
        therapists: &[TherapistId],
        window: &DateRange,
    ) -> Result<Vec<Availability>, TemporalError> {
        let mut slots = Vec::new();
        for therapist_id in therapists {
            for date in window.days() {
                slots.extend(self.plan_day(therapist_id, date)?);
            }
        }
        Ok(slots)
    }
}
