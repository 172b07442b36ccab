//! Row types and SQL for the scheduling tables
//!
//! Repositories borrow a single `PgConnection` rather than the pool. The
//! adapter checks one connection out per port call and builds whichever
//! repositories it needs on top of it; the seeder does the same with its
//! transaction.

pub mod payer;
pub mod therapist;
pub mod availability;

pub use payer::{PayerRepository, PayerRow, PayerSummaryRow};
pub use therapist::{MembershipRow, TherapistRepository, TherapistRow};
pub use availability::{AvailabilityRepository, AvailabilityRow};
