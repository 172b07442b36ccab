//! Test Data Builders
//!
//! Builders for therapists and slots with sensible defaults, so tests only
//! state the fields they care about.

use chrono::{Duration, NaiveDate};
use core_kernel::{PayerId, TherapistId, TimeSlot};
use domain_scheduling::{Availability, MockSchedulingPort, Therapist, TherapistInsurance};
use fake::faker::name::en::Name;
use fake::Fake;

use crate::fixtures::TemporalFixtures;

/// Builder for a therapist and the payers they accept
pub struct TestTherapistBuilder {
    id: TherapistId,
    name: String,
    payers: Vec<PayerId>,
}

impl Default for TestTherapistBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTherapistBuilder {
    /// Random id and a fake name, accepting no payers
    pub fn new() -> Self {
        let name: String = Name().fake();
        Self {
            id: TherapistId::generate(),
            name: format!("Dr. {}", name),
            payers: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<TherapistId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an accepted payer
    pub fn accepting(mut self, payer: impl Into<PayerId>) -> Self {
        self.payers.push(payer.into());
        self
    }

    pub fn build(self) -> (Therapist, Vec<TherapistInsurance>) {
        let links = self
            .payers
            .into_iter()
            .map(|payer| TherapistInsurance::new(self.id.clone(), payer))
            .collect();
        (Therapist::new(self.id, self.name), links)
    }

    /// Builds the therapist and stores it with its payer links
    pub async fn insert_into(self, port: &MockSchedulingPort) -> TherapistId {
        let (therapist, links) = self.build();
        let id = therapist.id.clone();
        port.insert_therapist(therapist).await;
        for link in links {
            port.link(link.therapist_id, link.insurance_payer_id).await;
        }
        id
    }
}

/// Builder for availability slots
pub struct TestAvailabilityBuilder {
    therapist_id: TherapistId,
    date: NaiveDate,
    hour: u32,
    length: Duration,
}

impl TestAvailabilityBuilder {
    /// A one hour slot at 09:00 UTC on the first planned day
    pub fn new(therapist_id: impl Into<TherapistId>) -> Self {
        Self {
            therapist_id: therapist_id.into(),
            date: TemporalFixtures::first_planned_day(),
            hour: 9,
            length: Duration::hours(1),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn at_hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }

    pub fn lasting(mut self, length: Duration) -> Self {
        self.length = length;
        self
    }

    /// # Panics
    ///
    /// Panics if the hour or length do not form a valid slot
    pub fn build(self) -> Availability {
        let start = TimeSlot::hourly(self.date, self.hour)
            .expect("valid hour")
            .start();
        let slot = TimeSlot::with_duration(start, self.length).expect("positive length");
        Availability::new(self.therapist_id, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_therapist_builder_links_payers() {
        let (therapist, links) = TestTherapistBuilder::new()
            .with_id("t99")
            .accepting("aetna")
            .accepting("humana")
            .build();

        assert_eq!(therapist.id, TherapistId::new("t99"));
        assert!(therapist.name.starts_with("Dr. "));
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.therapist_id == therapist.id));
    }

    #[test]
    fn test_availability_builder_defaults() {
        let slot = TestAvailabilityBuilder::new("t1").at_hour(14).build();
        assert_eq!(slot.slot.start_hour(), 14);
        assert_eq!(slot.slot.duration(), Duration::hours(1));
        assert_eq!(slot.slot.date(), TemporalFixtures::first_planned_day());
    }
}
