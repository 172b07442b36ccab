//! Therapist Scheduling - Seeder Binary
//!
//! Inserts the reference payers, therapists and assignments, then random
//! availability for the days 4 to 14 from today (UTC). Safe to run again.
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/scheduling cargo run --bin scheduling-seed
//! ```

use anyhow::Context;
use chrono::Utc;
use infra_db::{create_pool, run_migrations, DatabaseConfig, Seeder};
use interface_api::{config::ApiConfig, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format);

    let pool = create_pool(DatabaseConfig::new(&config.database_url).max_connections(2))
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let today = Utc::now().date_naive();
    let report = Seeder::new(pool.clone())
        .run(today)
        .await
        .context("Seeding failed")?;

    tracing::info!(
        payers = report.payers_inserted,
        therapists = report.therapists_inserted,
        links = report.links_inserted,
        availabilities = report.availabilities_inserted,
        skipped_therapists = report.therapists_skipped,
        "Database seeded successfully"
    );

    pool.close().await;
    Ok(())
}
