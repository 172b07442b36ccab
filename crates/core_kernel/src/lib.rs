//! Core Kernel - Foundational types for the scheduling service
//!
//! This crate provides the building blocks shared by the domain, database and
//! HTTP crates:
//! - Strongly-typed string identifiers for payers, therapists and slots
//! - Time slot and date range types with validated bounds
//! - Port error and health check types for the ports and adapters layout

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{TimeSlot, DateRange, TemporalError};
pub use identifiers::{PayerId, TherapistId, AvailabilityId, IdentifierError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
