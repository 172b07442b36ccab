//! Test Utilities Crate
//!
//! Shared test infrastructure for the scheduling crates.
//!
//! # Modules
//!
//! - `fixtures`: fixed dates and a seeded in-memory store
//! - `builders`: builders for therapists and slots
//! - `database`: PostgreSQL testcontainer with the schema applied
//! - `assertions`: assertion helpers for search results
//! - `generators`: proptest strategies

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
