//! Scheduling application service
//!
//! Validates caller input, delegates to the [`SchedulingPort`], and applies
//! the optional search filters to the loaded slots.

use std::sync::Arc;

use core_kernel::{HealthCheckResult, PayerId};
use tracing::{info, instrument};

use crate::availability::AvailabilityFilter;
use crate::error::SchedulingError;
use crate::payer::PayerSummary;
use crate::ports::SchedulingPort;
use crate::view::AvailabilityWithTherapist;

/// Entry point used by the HTTP layer
#[derive(Clone)]
pub struct SchedulingService {
    port: Arc<dyn SchedulingPort>,
}

impl SchedulingService {
    pub fn new(port: Arc<dyn SchedulingPort>) -> Self {
        Self { port }
    }

    /// Lists all payers ordered by name
    pub async fn list_payers(&self) -> Result<Vec<PayerSummary>, SchedulingError> {
        Ok(self.port.list_payers().await?)
    }

    /// Finds the slots accepted by a payer
    ///
    /// # Errors
    ///
    /// * `SchedulingError::MissingInsurance` if `insurance` is blank
    /// * `SchedulingError::Port` if the store fails
    #[instrument(skip(self, filter))]
    pub async fn search_availabilities(
        &self,
        insurance: &str,
        filter: &AvailabilityFilter,
    ) -> Result<Vec<AvailabilityWithTherapist>, SchedulingError> {
        let payer: PayerId = insurance
            .parse()
            .map_err(|_| SchedulingError::MissingInsurance)?;

        info!(insurance = %payer, "Received availability search");

        let slots = self.port.availabilities_for_payer(&payer).await?;
        let found = slots.len();
        let slots = filter.apply(slots);

        info!(found, returned = slots.len(), "Found availabilities");
        Ok(slots)
    }

    /// Checks that the backing store is reachable
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
