//! Availability slot queries

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use core_kernel::{AvailabilityId, PayerId, TherapistId, TimeSlot};
use domain_scheduling::Availability;

use crate::error::DatabaseError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvailabilityRow {
    pub id: String,
    pub therapist_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AvailabilityRow> for Availability {
    type Error = DatabaseError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let slot = TimeSlot::new(row.start_time, row.end_time)
            .map_err(|e| DatabaseError::InvalidRow(format!("availability {}: {}", row.id, e)))?;

        Ok(Availability {
            id: AvailabilityId::new(row.id),
            therapist_id: TherapistId::new(row.therapist_id),
            slot,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Queries against `availabilities`
pub struct AvailabilityRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> AvailabilityRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Slots of every therapist accepting `payer`, by start time then id
    pub async fn for_payer(&mut self, payer: &PayerId) -> Result<Vec<AvailabilityRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT a.id, a.therapist_id, a.start_time, a.end_time, a.created_at, a.updated_at
            FROM availabilities a
            JOIN therapist_insurance ti ON ti.therapist_id = a.therapist_id
            WHERE ti.insurance_payer_id = $1
            ORDER BY a.start_time, a.id
            "#,
        )
        .bind(payer.as_str())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Therapists owning at least one slot that starts in `[from, until)`
    pub async fn therapists_with_slots_between(
        &mut self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<String>, DatabaseError> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT therapist_id
            FROM availabilities
            WHERE start_time >= $1 AND start_time < $2
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(ids)
    }

    pub async fn insert(&mut self, availability: &Availability) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO availabilities (id, therapist_id, start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(availability.id.as_str())
        .bind(availability.therapist_id.as_str())
        .bind(availability.start_time())
        .bind(availability.end_time())
        .bind(availability.created_at)
        .bind(availability.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    pub async fn count(&mut self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM availabilities")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}
