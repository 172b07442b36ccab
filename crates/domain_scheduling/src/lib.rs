//! Scheduling Domain
//!
//! This crate models the therapist availability lookup:
//!
//! - **Payers** ([`InsurancePayer`]): insurance organizations
//! - **Therapists** ([`Therapist`]) and the explicit junction
//!   [`TherapistInsurance`] recording which payers each therapist accepts
//! - **Availability** ([`Availability`]): one-hour bookable slots owned by a therapist
//!
//! The central read is "every slot of every therapist accepting payer P, with
//! each therapist's full payer list embedded". Storage is reached through the
//! [`SchedulingPort`] trait; [`view::assemble_availabilities`] turns the loaded
//! rows into the nested [`AvailabilityWithTherapist`] records.
//!
//! # Example
//!
//! ```rust
//! use domain_scheduling::{AvailabilityFilter, TimeSegment};
//! use chrono::NaiveDate;
//!
//! let filter = AvailabilityFilter::default()
//!     .on_date(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap())
//!     .in_segments([TimeSegment::Morning]);
//! assert!(!filter.is_empty());
//! ```

pub mod payer;
pub mod therapist;
pub mod availability;
pub mod view;
pub mod error;
pub mod ports;
pub mod services;
pub mod seed;

pub use payer::{InsurancePayer, PayerSummary};
pub use therapist::{Therapist, TherapistInsurance};
pub use availability::{Availability, AvailabilityFilter, DatePreset, TimeSegment};
pub use view::{AvailabilityWithTherapist, PayerMembership, TherapistWithPayers};
pub use error::SchedulingError;
pub use ports::SchedulingPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockSchedulingPort;
pub use services::SchedulingService;
pub use seed::{reference_data, ReferenceData, SlotPlanConfig, SlotPlanner};
