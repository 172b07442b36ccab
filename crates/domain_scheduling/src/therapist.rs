//! Therapists and their accepted payers
//!
//! The many-to-many relation between therapists and payers is an explicit
//! junction record, [`TherapistInsurance`], keyed by the pair of identifiers.

use chrono::{DateTime, Utc};
use core_kernel::{PayerId, TherapistId};
use serde::{Deserialize, Serialize};

/// A therapist offering appointments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Therapist {
    pub id: TherapistId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Therapist {
    pub fn new(id: impl Into<TherapistId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Junction record: the therapist accepts the payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistInsurance {
    pub therapist_id: TherapistId,
    pub insurance_payer_id: PayerId,
    pub created_at: DateTime<Utc>,
}

impl TherapistInsurance {
    pub fn new(therapist_id: impl Into<TherapistId>, insurance_payer_id: impl Into<PayerId>) -> Self {
        Self {
            therapist_id: therapist_id.into(),
            insurance_payer_id: insurance_payer_id.into(),
            created_at: Utc::now(),
        }
    }

    /// The composite key of the junction row
    pub fn key(&self) -> (&TherapistId, &PayerId) {
        (&self.therapist_id, &self.insurance_payer_id)
    }
}
