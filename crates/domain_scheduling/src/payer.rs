//! Insurance payers

use chrono::{DateTime, Utc};
use core_kernel::PayerId;
use serde::{Deserialize, Serialize};

/// An insurance organization that therapists may accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePayer {
    pub id: PayerId,
    /// Display name, e.g. "Blue Cross Blue Shield"
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InsurancePayer {
    /// Creates a payer stamped with the current time
    pub fn new(id: impl Into<PayerId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> PayerSummary {
        PayerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// The `{id, name}` projection of a payer used in listings and embeds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayerSummary {
    pub id: PayerId,
    pub name: String,
}

impl PayerSummary {
    pub fn new(id: impl Into<PayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Sorts payers by name ascending, breaking ties by identifier
pub fn sort_by_name(payers: &mut [PayerSummary]) {
    payers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_breaks_ties_by_id() {
        let mut payers = vec![
            PayerSummary::new("zeta", "Shared"),
            PayerSummary::new("aetna", "Aetna"),
            PayerSummary::new("alpha", "Shared"),
        ];
        sort_by_name(&mut payers);
        let ids: Vec<_> = payers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["aetna", "alpha", "zeta"]);
    }

    #[test]
    fn test_summary_drops_timestamps() {
        let payer = InsurancePayer::new("humana", "Humana");
        assert_eq!(payer.summary(), PayerSummary::new("humana", "Humana"));
        assert_eq!(payer.created_at, payer.updated_at);
    }
}
