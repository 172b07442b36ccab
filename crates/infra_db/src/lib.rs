//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the therapist scheduling lookup, using SQLx.
//!
//! - [`pool`]: connection pool settings and embedded migrations
//! - [`repositories`]: row types and SQL, one repository per table group
//! - [`adapters`]: [`PostgresSchedulingAdapter`], the `SchedulingPort` implementation
//! - [`seeder`]: writes the reference data and a random availability plan
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresSchedulingAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/scheduling")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresSchedulingAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;
pub mod seeder;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, MIGRATOR};
pub use error::DatabaseError;
pub use adapters::PostgresSchedulingAdapter;
pub use seeder::{SeedReport, Seeder};
