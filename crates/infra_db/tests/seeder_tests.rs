//! Integration tests for the seeder
//!
//! Ignored by default; they need a Docker daemon.

use std::collections::HashSet;

use core_kernel::PayerId;
use domain_scheduling::SchedulingPort;
use infra_db::repositories::AvailabilityRepository;
use infra_db::{PostgresSchedulingAdapter, Seeder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_utils::{create_isolated_test_database, SchedulingFixtures, TemporalFixtures};

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_first_run_writes_reference_data_and_plan() {
    let db = create_isolated_test_database().await.unwrap();

    let report = Seeder::new(db.pool().clone())
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(3))
        .await
        .unwrap();

    assert_eq!(report.payers_inserted, 7);
    assert_eq!(report.therapists_inserted, 16);
    assert_eq!(report.links_inserted, 37);
    assert_eq!(report.therapists_skipped, 0);
    // Same seed, same plan as the in-memory fixture
    assert_eq!(report.availabilities_inserted, SchedulingFixtures::planned_slots(3).len());

    let mut conn = db.pool().acquire().await.unwrap();
    let stored = AvailabilityRepository::new(&mut *conn).count().await.unwrap();
    assert_eq!(stored as usize, report.availabilities_inserted);
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_second_run_adds_nothing() {
    let db = create_isolated_test_database().await.unwrap();
    let seeder = Seeder::new(db.pool().clone());

    let first = seeder
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(4))
        .await
        .unwrap();
    let second = seeder
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(5))
        .await
        .unwrap();

    assert!(first.availabilities_inserted > 0);
    assert_eq!(second.payers_inserted, 0);
    assert_eq!(second.therapists_inserted, 0);
    assert_eq!(second.links_inserted, 0);
    assert_eq!(second.therapists_skipped, 16);
    assert_eq!(second.availabilities_inserted, 0);

    let mut conn = db.pool().acquire().await.unwrap();
    let stored = AvailabilityRepository::new(&mut *conn).count().await.unwrap();
    assert_eq!(stored as usize, first.availabilities_inserted);
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_seeded_slots_are_whole_hours_in_window() {
    let db = create_isolated_test_database().await.unwrap();
    Seeder::new(db.pool().clone())
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(6))
        .await
        .unwrap();
    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());
    let window = TemporalFixtures::planning_window();

    let results = adapter.availabilities_for_payer(&PayerId::new("aetna")).await.unwrap();

    let ids: HashSet<_> = results.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids.len(), results.len());
    for item in &results {
        assert_eq!(item.slot.duration(), chrono::Duration::hours(1));
        assert!(window.contains(item.slot.date()));
        assert!((9..=17).contains(&item.slot.start_hour()));
    }
}
