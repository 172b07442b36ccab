//! Database seeder
//!
//! Writes the fixed reference data and a random availability plan in one
//! transaction. Reference rows use `ON CONFLICT DO NOTHING`, and a therapist
//! that already owns a slot inside the planning window gets no new slots, so
//! running the seeder twice leaves the data unchanged.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::PgPool;
use tracing::{info, instrument};

use core_kernel::TherapistId;
use domain_scheduling::{ReferenceData, SlotPlanConfig, SlotPlanner};

use crate::error::DatabaseError;
use crate::repositories::{AvailabilityRepository, PayerRepository, TherapistRepository};

/// Row counts written by one seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub payers_inserted: usize,
    pub therapists_inserted: usize,
    pub links_inserted: usize,
    /// Therapists that already had slots in the window
    pub therapists_skipped: usize,
    pub availabilities_inserted: usize,
}

pub struct Seeder {
    pool: PgPool,
    data: ReferenceData,
    plan: SlotPlanConfig,
}

impl Seeder {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            data: domain_scheduling::reference_data(),
            plan: SlotPlanConfig::default(),
        }
    }

    pub fn with_reference_data(mut self, data: ReferenceData) -> Self {
        self.data = data;
        self
    }

    pub fn with_plan(mut self, plan: SlotPlanConfig) -> Self {
        self.plan = plan;
        self
    }

    /// Seeds relative to `today` using an entropy-seeded RNG
    pub async fn run(&self, today: NaiveDate) -> Result<SeedReport, DatabaseError> {
        self.run_with_rng(today, StdRng::from_entropy()).await
    }

    #[instrument(skip(self, rng))]
    pub async fn run_with_rng<R>(&self, today: NaiveDate, rng: R) -> Result<SeedReport, DatabaseError>
    where
        R: Rng + Send,
    {
        let window = self
            .plan
            .window(today)
            .map_err(|e| DatabaseError::InvalidRow(e.to_string()))?;
        let mut report = SeedReport::default();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let mut payers = PayerRepository::new(&mut *tx);
        for payer in &self.data.payers {
            if payers.insert_if_absent(payer).await? {
                report.payers_inserted += 1;
            }
        }
        info!(inserted = report.payers_inserted, total = self.data.payers.len(), "Seeded insurance payers");

        let mut therapists = TherapistRepository::new(&mut *tx);
        for therapist in &self.data.therapists {
            if therapists.insert_if_absent(therapist).await? {
                report.therapists_inserted += 1;
            }
        }
        for link in &self.data.assignments {
            if therapists.link_if_absent(link).await? {
                report.links_inserted += 1;
            }
        }
        info!(
            therapists = report.therapists_inserted,
            links = report.links_inserted,
            "Seeded therapists and payer assignments"
        );

        let (from, until) = window.utc_bounds();
        let mut availabilities = AvailabilityRepository::new(&mut *tx);
        let already_seeded: HashSet<String> = availabilities
            .therapists_with_slots_between(from, until)
            .await?
            .into_iter()
            .collect();

        let pending: Vec<TherapistId> = self
            .data
            .therapist_ids()
            .into_iter()
            .filter(|id| !already_seeded.contains(id.as_str()))
            .collect();
        report.therapists_skipped = self.data.therapists.len() - pending.len();

        let slots = SlotPlanner::new(self.plan.clone(), rng)
            .plan(&pending, &window)
            .map_err(|e| DatabaseError::InvalidRow(e.to_string()))?;
        for slot in &slots {
            availabilities.insert(slot).await?;
        }
        report.availabilities_inserted = slots.len();
        info!(
            inserted = report.availabilities_inserted,
            skipped_therapists = report.therapists_skipped,
            first_day = %window.start,
            last_day = %window.end,
            "Seeded availabilities"
        );

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(report)
    }
}
