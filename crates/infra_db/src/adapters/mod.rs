//! Port adapters backed by PostgreSQL

pub mod scheduling;

pub use scheduling::PostgresSchedulingAdapter;
