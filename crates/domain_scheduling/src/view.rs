//! Nested read models for payer searches
//!
//! A payer search loads three row sets: the matching slots, the therapists
//! owning them, and every payer membership of those therapists.
//! [`assemble_availabilities`] stitches them into one record per slot with the
//! therapist and the therapist's full payer list embedded.

use std::collections::HashMap;

use core_kernel::{AvailabilityId, PayerId, TherapistId, TimeSlot};
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::error::SchedulingError;
use crate::payer::{sort_by_name, PayerSummary};
use crate::therapist::Therapist;

/// A therapist with every payer they accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistWithPayers {
    pub id: TherapistId,
    pub name: String,
    pub insurance_payers: Vec<PayerSummary>,
}

impl TherapistWithPayers {
    pub fn accepts(&self, payer: &PayerId) -> bool {
        self.insurance_payers.iter().any(|p| &p.id == payer)
    }
}

/// One slot joined with its owning therapist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWithTherapist {
    pub id: AvailabilityId,
    pub therapist_id: TherapistId,
    pub slot: TimeSlot,
    pub therapist: TherapistWithPayers,
}

/// A payer accepted by a therapist, as loaded through the junction table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerMembership {
    pub therapist_id: TherapistId,
    pub payer: PayerSummary,
}

impl PayerMembership {
    pub fn new(therapist_id: impl Into<TherapistId>, payer: PayerSummary) -> Self {
        Self {
            therapist_id: therapist_id.into(),
            payer,
        }
    }
}

/// Joins slots with their therapists and the therapists' payer lists
///
/// Slot order is preserved. Each therapist's payers are sorted by name. A
/// slot whose therapist is missing from `therapists` is a
/// [`SchedulingError::DataIntegrity`] error.
pub fn assemble_availabilities(
    slots: Vec<Availability>,
    therapists: Vec<Therapist>,
    memberships: Vec<PayerMembership>,
) -> Result<Vec<AvailabilityWithTherapist>, SchedulingError> {
    let mut payers_by_therapist: HashMap<TherapistId, Vec<PayerSummary>> = HashMap::new();
    for membership in memberships {
        payers_by_therapist
            .entry(membership.therapist_id)
            .or_default()
            .push(membership.payer);
    }

    let views: HashMap<TherapistId, TherapistWithPayers> = therapists
        .into_iter()
        .map(|therapist| {
            let mut insurance_payers = payers_by_therapist.remove(&therapist.id).unwrap_or_default();
            sort_by_name(&mut insurance_payers);
            insurance_payers.dedup_by(|a, b| a.id == b.id);
            let view = TherapistWithPayers {
                id: therapist.id.clone(),
                name: therapist.name,
                insurance_payers,
            };
            (therapist.id, view)
        })
        .collect();

    slots
        .into_iter()
        .map(|slot| {
            let therapist = views.get(&slot.therapist_id).cloned().ok_or_else(|| {
                SchedulingError::DataIntegrity(format!(
                    "availability {} references unknown therapist {}",
                    slot.id, slot.therapist_id
                ))
            })?;
            Ok(AvailabilityWithTherapist {
                id: slot.id,
                therapist_id: slot.therapist_id,
                slot: slot.slot,
                therapist,
            })
        })
        .collect()
}
