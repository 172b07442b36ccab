//! Scheduling Domain Ports
//!
//! The `SchedulingPort` trait is everything the scheduling domain needs from
//! its data source. The PostgreSQL adapter lives in `infra_db`; an in-memory
//! implementation is available behind the `mock` feature for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_scheduling::{SchedulingPort, SchedulingService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn SchedulingPort> = Arc::new(PostgresSchedulingAdapter::new(pool));
//! let service = SchedulingService::new(port);
//! let slots = service.search_availabilities("bluecross", &Default::default()).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PayerId, PortError};

use crate::payer::PayerSummary;
use crate::view::AvailabilityWithTherapist;

/// Read operations backing the payer lookup API
#[async_trait]
pub trait SchedulingPort: DomainPort + HealthCheckable {
    /// Lists every payer, sorted by name ascending and then by identifier
    async fn list_payers(&self) -> Result<Vec<PayerSummary>, PortError>;

    /// Returns the slots of every therapist accepting `payer`
    ///
    /// Each record embeds the owning therapist with all of the therapist's
    /// payers, not only `payer`. Slots are ordered by start time, then id. An
    /// unknown payer yields an empty list.
    async fn availabilities_for_payer(
        &self,
        payer: &PayerId,
    ) -> Result<Vec<AvailabilityWithTherapist>, PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, TherapistId};

    use crate::availability::{sort_chronologically, Availability};
    use crate::payer::{sort_by_name, InsurancePayer};
    use crate::seed::ReferenceData;
    use crate::therapist::{Therapist, TherapistInsurance};
    use crate::view::{assemble_availabilities, PayerMembership};

    #[derive(Debug, Default)]
    struct MockState {
        payers: HashMap<PayerId, InsurancePayer>,
        therapists: HashMap<TherapistId, Therapist>,
        links: Vec<TherapistInsurance>,
        availabilities: Vec<Availability>,
        failure: Option<String>,
    }

    /// In-memory implementation of SchedulingPort
    #[derive(Debug, Default, Clone)]
    pub struct MockSchedulingPort {
        state: Arc<RwLock<MockState>>,
    }

    impl MockSchedulingPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a port holding the fixed payers, therapists and assignments
        pub async fn with_reference_data(data: &ReferenceData) -> Self {
            let port = Self::new();
            for payer in &data.payers {
                port.insert_payer(payer.clone()).await;
            }
            for therapist in &data.therapists {
                port.insert_therapist(therapist.clone()).await;
            }
            for link in &data.assignments {
                port.link(link.therapist_id.clone(), link.insurance_payer_id.clone()).await;
            }
            port
        }

        pub async fn insert_payer(&self, payer: InsurancePayer) {
            self.state.write().await.payers.insert(payer.id.clone(), payer);
        }

        pub async fn insert_therapist(&self, therapist: Therapist) {
            self.state.write().await.therapists.insert(therapist.id.clone(), therapist);
        }

        /// Records that a therapist accepts a payer; repeated pairs are ignored
        pub async fn link(&self, therapist_id: impl Into<TherapistId>, payer_id: impl Into<PayerId>) {
            let link = TherapistInsurance::new(therapist_id, payer_id);
            let mut state = self.state.write().await;
            if !state.links.iter().any(|l| l.key() == link.key()) {
                state.links.push(link);
            }
        }

        pub async fn insert_availabilities(&self, slots: impl IntoIterator<Item = Availability>) {
            self.state.write().await.availabilities.extend(slots);
        }

        /// Makes every subsequent call fail as if the store were down
        pub async fn fail_with(&self, message: impl Into<String>) {
            self.state.write().await.failure = Some(message.into());
        }

        pub async fn availability_count(&self) -> usize {
            self.state.read().await.availabilities.len()
        }
    }

    impl DomainPort for MockSchedulingPort {}

    #[async_trait]
    impl HealthCheckable for MockSchedulingPort {
        async fn health_check(&self) -> HealthCheckResult {
            let failure = self.state.read().await.failure.clone();
            HealthCheckResult {
                adapter_id: "mock-scheduling-port".to_string(),
                status: if failure.is_some() { AdapterHealth::Unhealthy } else { AdapterHealth::Healthy },
                latency_ms: 0,
                message: failure,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl SchedulingPort for MockSchedulingPort {
        async fn list_payers(&self) -> Result<Vec<PayerSummary>, PortError> {
            let state = self.state.read().await;
            if let Some(ref message) = state.failure {
                return Err(PortError::connection(message.clone()));
            }
            let mut payers: Vec<_> = state.payers.values().map(InsurancePayer::summary).collect();
            sort_by_name(&mut payers);
            Ok(payers)
        }

        async fn availabilities_for_payer(
            &self,
            payer: &PayerId,
        ) -> Result<Vec<AvailabilityWithTherapist>, PortError> {
            let state = self.state.read().await;
            if let Some(ref message) = state.failure {
                return Err(PortError::connection(message.clone()));
            }

            let accepting: HashSet<&TherapistId> = state
                .links
                .iter()
                .filter(|l| &l.insurance_payer_id == payer)
                .map(|l| &l.therapist_id)
                .collect();

            let mut slots: Vec<Availability> = state
                .availabilities
                .iter()
                .filter(|a| accepting.contains(&a.therapist_id))
                .cloned()
                .collect();
            sort_chronologically(&mut slots);

            let therapists: Vec<Therapist> = accepting
                .iter()
                .filter_map(|id| state.therapists.get(*id).cloned())
                .collect();

            let memberships: Vec<PayerMembership> = state
                .links
                .iter()
                .filter(|l| accepting.contains(&l.therapist_id))
                .filter_map(|l| {
                    state
                        .payers
                        .get(&l.insurance_payer_id)
                        .map(|p| PayerMembership::new(l.therapist_id.clone(), p.summary()))
                })
                .collect();

            assemble_availabilities(slots, therapists, memberships)
                .map_err(|e| PortError::transformation(e.to_string()))
        }
    }
}
