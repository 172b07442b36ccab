//! PostgreSQL Scheduling Adapter
//!
//! Implements [`SchedulingPort`] on top of the repositories. Every port call
//! checks exactly one connection out of the pool, runs its queries on it and
//! returns it to the pool when the connection guard drops, whether the call
//! succeeded or not.
//!
//! A payer search runs three queries on that connection:
//!
//! 1. the payer's slots, joined through `therapist_insurance`
//! 2. the therapists owning those slots
//! 3. every payer membership of those therapists
//!
//! and [`assemble_availabilities`] nests the results.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::PostgresSchedulingAdapter;
//! use domain_scheduling::SchedulingPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn SchedulingPort> = Arc::new(PostgresSchedulingAdapter::new(pool));
//! let payers = port.list_payers().await?;
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PayerId, PortError};
use domain_scheduling::view::assemble_availabilities;
use domain_scheduling::{
    Availability, AvailabilityWithTherapist, PayerMembership, PayerSummary, SchedulingPort, Therapist,
};

use crate::error::DatabaseError;
use crate::repositories::{AvailabilityRepository, PayerRepository, TherapistRepository};

const ADAPTER_ID: &str = "postgres-scheduling-adapter";

/// PostgreSQL-backed implementation of the SchedulingPort trait
#[derive(Debug, Clone)]
pub struct PostgresSchedulingAdapter {
    pool: PgPool,
}

impl PostgresSchedulingAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn connection(&self) -> Result<PoolConnection<Postgres>, DatabaseError> {
        Ok(self.pool.acquire().await?)
    }

    async fn load_availabilities(
        &self,
        payer: &PayerId,
    ) -> Result<Vec<AvailabilityWithTherapist>, DatabaseError> {
        let mut conn = self.connection().await?;

        let slots = AvailabilityRepository::new(&mut *conn)
            .for_payer(payer)
            .await?
            .into_iter()
            .map(Availability::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: Vec<String> = slots
            .iter()
            .map(|slot| slot.therapist_id.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut therapists = TherapistRepository::new(&mut *conn);
        let owners: Vec<Therapist> = therapists
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(Therapist::from)
            .collect();
        let memberships: Vec<PayerMembership> = therapists
            .memberships(&owner_ids)
            .await?
            .into_iter()
            .map(PayerMembership::from)
            .collect();

        debug!(
            slots = slots.len(),
            therapists = owners.len(),
            memberships = memberships.len(),
            "Loaded payer search rows"
        );

        assemble_availabilities(slots, owners, memberships)
            .map_err(|e| DatabaseError::InvalidRow(e.to_string()))
    }
}

impl DomainPort for PostgresSchedulingAdapter {}

#[async_trait]
impl HealthCheckable for PostgresSchedulingAdapter {
    /// Runs `SELECT 1` on a pooled connection
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl SchedulingPort for PostgresSchedulingAdapter {
    #[instrument(skip(self))]
    async fn list_payers(&self) -> Result<Vec<PayerSummary>, PortError> {
        let mut conn = self.connection().await?;

        let payers: Vec<PayerSummary> = PayerRepository::new(&mut *conn)
            .list_summaries()
            .await?
            .into_iter()
            .map(PayerSummary::from)
            .collect();

        debug!(count = payers.len(), "Listed insurance payers");
        Ok(payers)
    }

    #[instrument(skip(self), fields(insurance = %payer))]
    async fn availabilities_for_payer(
        &self,
        payer: &PayerId,
    ) -> Result<Vec<AvailabilityWithTherapist>, PortError> {
        Ok(self.load_availabilities(payer).await?)
    }
}
