//! Custom Test Assertions
//!
//! Assertion helpers for search results with messages naming the offending
//! record.

use core_kernel::PayerId;
use domain_scheduling::{AvailabilityWithTherapist, PayerSummary};

/// Asserts slots are ordered by start time, then id
pub fn assert_chronological(results: &[AvailabilityWithTherapist]) {
    for pair in results.windows(2) {
        let ordered = (pair[0].slot.start(), &pair[0].id) <= (pair[1].slot.start(), &pair[1].id);
        assert!(
            ordered,
            "Slot {} at {} comes before slot {} at {}",
            pair[0].id,
            pair[0].slot.start(),
            pair[1].id,
            pair[1].slot.start()
        );
    }
}

/// Asserts every embedded therapist accepts `payer`
pub fn assert_all_accept(results: &[AvailabilityWithTherapist], payer: &PayerId) {
    for item in results {
        assert!(
            item.therapist.accepts(payer),
            "Therapist {} on slot {} does not accept {}",
            item.therapist.id,
            item.id,
            payer
        );
        assert_eq!(
            item.therapist.id, item.therapist_id,
            "Slot {} embeds the wrong therapist",
            item.id
        );
    }
}

/// Asserts payers are sorted by name, ties broken by id
pub fn assert_payers_sorted(payers: &[PayerSummary]) {
    for pair in payers.windows(2) {
        assert!(
            (&pair[0].name, &pair[0].id) <= (&pair[1].name, &pair[1].id),
            "Payer {} ({}) listed before {} ({})",
            pair[0].id,
            pair[0].name,
            pair[1].id,
            pair[1].name
        );
    }
}
