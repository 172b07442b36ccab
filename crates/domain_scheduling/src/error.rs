//! Scheduling domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the scheduling domain
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The caller did not name an insurance payer
    #[error("Insurance parameter is required")]
    MissingInsurance,

    /// A search filter could not be understood
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Stored rows reference each other inconsistently
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// The storage port failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl SchedulingError {
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        SchedulingError::InvalidFilter(message.into())
    }

    /// Returns true when the error was caused by the request rather than the store
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SchedulingError::MissingInsurance | SchedulingError::InvalidFilter(_)
        )
    }
}
