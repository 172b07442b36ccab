//! Integration tests for the PostgreSQL scheduling adapter
//!
//! These start a PostgreSQL container and are ignored by default:
//! `cargo test -p infra_db -- --ignored` with a Docker daemon running.

use core_kernel::{HealthCheckable, PayerId, TherapistId};
use domain_scheduling::{InsurancePayer, SchedulingPort};
use infra_db::repositories::{AvailabilityRepository, PayerRepository, TherapistRepository};
use infra_db::{PostgresSchedulingAdapter, Seeder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_utils::{
    assert_all_accept, assert_chronological, assert_payers_sorted, create_isolated_test_database,
    PayerFixtures, TemporalFixtures, TestAvailabilityBuilder, TestTherapistBuilder,
};

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_seeded_bluecross_search() {
    let db = create_isolated_test_database().await.unwrap();
    Seeder::new(db.pool().clone())
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(1))
        .await
        .unwrap();
    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());
    let payer = PayerId::new(PayerFixtures::BLUECROSS);

    let results = adapter.availabilities_for_payer(&payer).await.unwrap();

    assert!(!results.is_empty());
    assert_all_accept(&results, &payer);
    assert_chronological(&results);

    let t7 = results
        .iter()
        .find(|a| a.therapist_id == TherapistId::new("t7"))
        .expect("t7 accepts bluecross");
    let ids: Vec<_> = t7.therapist.insurance_payers.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["aetna", "bluecross", "cigna", "united"]);
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_unknown_payer_returns_empty() {
    let db = create_isolated_test_database().await.unwrap();
    Seeder::new(db.pool().clone())
        .run_with_rng(TemporalFixtures::today(), StdRng::seed_from_u64(2))
        .await
        .unwrap();
    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());

    let results = adapter
        .availabilities_for_payer(&PayerId::new(PayerFixtures::UNKNOWN))
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_payer_listing_sorted_and_empty_store() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());

    assert!(adapter.list_payers().await.unwrap().is_empty());

    let mut conn = db.pool().acquire().await.unwrap();
    let mut payers = PayerRepository::new(&mut *conn);
    for (id, name) in [("zeta", "Shared"), ("humana", "Humana"), ("alpha", "Shared")] {
        assert!(payers.insert_if_absent(&InsurancePayer::new(id, name)).await.unwrap());
    }
    drop(conn);

    let listed = adapter.list_payers().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["humana", "alpha", "zeta"]);
    assert_payers_sorted(&listed);
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_therapist_without_slots_contributes_nothing() {
    let db = create_isolated_test_database().await.unwrap();
    let mut conn = db.pool().acquire().await.unwrap();

    PayerRepository::new(&mut *conn)
        .insert_if_absent(&InsurancePayer::new("cigna", "Cigna"))
        .await
        .unwrap();

    let (busy, busy_links) = TestTherapistBuilder::new().with_id("busy").accepting("cigna").build();
    let (idle, idle_links) = TestTherapistBuilder::new().with_id("idle").accepting("cigna").build();
    let mut therapists = TherapistRepository::new(&mut *conn);
    for therapist in [&busy, &idle] {
        therapists.insert_if_absent(therapist).await.unwrap();
    }
    for link in busy_links.iter().chain(&idle_links) {
        therapists.link_if_absent(link).await.unwrap();
    }

    let mut availabilities = AvailabilityRepository::new(&mut *conn);
    availabilities
        .insert(&TestAvailabilityBuilder::new("busy").at_hour(15).build())
        .await
        .unwrap();
    availabilities
        .insert(&TestAvailabilityBuilder::new("busy").at_hour(10).build())
        .await
        .unwrap();
    drop(conn);

    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());
    let results = adapter.availabilities_for_payer(&PayerId::new("cigna")).await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|a| a.therapist_id == TherapistId::new("busy")));
    assert_eq!(results[0].slot.start_hour(), 10);
    assert_eq!(results[1].slot.start_hour(), 15);
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_inverted_slot_violates_check_constraint() {
    let db = create_isolated_test_database().await.unwrap();

    sqlx::query("INSERT INTO therapists (id, name) VALUES ('t1', 'Dr. Therapist 1')")
        .execute(db.pool())
        .await
        .unwrap();

    let err = sqlx::query(
        "INSERT INTO availabilities (id, therapist_id, start_time, end_time)
         VALUES ('a1', 't1', '2024-09-05T10:00:00Z', '2024-09-05T09:00:00Z')",
    )
    .execute(db.pool())
    .await
    .map_err(infra_db::DatabaseError::from)
    .unwrap_err();

    assert!(err.is_constraint_violation());
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_health_check_and_closed_pool() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresSchedulingAdapter::new(db.pool().clone());

    assert!(adapter.health_check().await.is_healthy());

    db.pool().close().await;
    assert!(!adapter.health_check().await.is_healthy());
    let err = adapter.list_payers().await.unwrap_err();
    assert!(err.is_transient());
}

async fn count_rows(pool: &infra_db::DatabasePool, sql: &str, id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn test_deletes_cascade_to_links_and_slots() {
    let db = create_isolated_test_database().await.unwrap();
    let mut conn = db.pool().acquire().await.unwrap();

    let mut payers = PayerRepository::new(&mut *conn);
    for (id, name) in [("aetna", "Aetna"), ("cigna", "Cigna")] {
        payers.insert_if_absent(&InsurancePayer::new(id, name)).await.unwrap();
    }

    let (kept, kept_links) = TestTherapistBuilder::new()
        .with_id("kept")
        .accepting("aetna")
        .accepting("cigna")
        .build();
    let (gone, gone_links) = TestTherapistBuilder::new()
        .with_id("gone")
        .accepting("aetna")
        .accepting("cigna")
        .build();
    let mut therapists = TherapistRepository::new(&mut *conn);
    for therapist in [&kept, &gone] {
        therapists.insert_if_absent(therapist).await.unwrap();
    }
    for link in kept_links.iter().chain(&gone_links) {
        therapists.link_if_absent(link).await.unwrap();
    }

    let mut availabilities = AvailabilityRepository::new(&mut *conn);
    for (therapist, hour) in [("kept", 9), ("gone", 9), ("gone", 11)] {
        availabilities
            .insert(&TestAvailabilityBuilder::new(therapist).at_hour(hour).build())
            .await
            .unwrap();
    }
    drop(conn);

    let pool = db.pool();
    let links_of_payer = "SELECT COUNT(*) FROM therapist_insurance WHERE insurance_payer_id = $1";
    let links_of_therapist = "SELECT COUNT(*) FROM therapist_insurance WHERE therapist_id = $1";
    let slots_of_therapist = "SELECT COUNT(*) FROM availabilities WHERE therapist_id = $1";

    assert_eq!(count_rows(pool, links_of_payer, "cigna").await, 2);
    sqlx::query("DELETE FROM insurance_payers WHERE id = $1")
        .bind("cigna")
        .execute(pool)
        .await
        .unwrap();
    assert_eq!(count_rows(pool, links_of_payer, "cigna").await, 0);
    assert_eq!(count_rows(pool, links_of_therapist, "kept").await, 1);
    assert_eq!(count_rows(pool, slots_of_therapist, "kept").await, 1);

    assert_eq!(count_rows(pool, slots_of_therapist, "gone").await, 2);
    sqlx::query("DELETE FROM therapists WHERE id = $1")
        .bind("gone")
        .execute(pool)
        .await
        .unwrap();
    assert_eq!(count_rows(pool, links_of_therapist, "gone").await, 0);
    assert_eq!(count_rows(pool, slots_of_therapist, "gone").await, 0);
    assert_eq!(count_rows(pool, links_of_payer, "aetna").await, 1);
    assert_eq!(count_rows(pool, slots_of_therapist, "kept").await, 1);
}
