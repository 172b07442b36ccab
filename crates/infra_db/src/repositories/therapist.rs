//! Therapist and junction table queries

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use core_kernel::TherapistId;
use domain_scheduling::{PayerMembership, PayerSummary, Therapist, TherapistInsurance};

use crate::error::DatabaseError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TherapistRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TherapistRow> for Therapist {
    fn from(row: TherapistRow) -> Self {
        Therapist {
            id: TherapistId::new(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One `therapist_insurance` row joined with the payer's name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MembershipRow {
    pub therapist_id: String,
    pub payer_id: String,
    pub payer_name: String,
}

impl From<MembershipRow> for PayerMembership {
    fn from(row: MembershipRow) -> Self {
        PayerMembership::new(row.therapist_id, PayerSummary::new(row.payer_id, row.payer_name))
    }
}

/// Queries against `therapists` and `therapist_insurance`
pub struct TherapistRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> TherapistRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_ids(&mut self, ids: &[String]) -> Result<Vec<TherapistRow>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TherapistRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM therapists
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Every payer accepted by each of the given therapists
    pub async fn memberships(&mut self, therapist_ids: &[String]) -> Result<Vec<MembershipRow>, DatabaseError> {
        if therapist_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT ti.therapist_id, p.id AS payer_id, p.name AS payer_name
            FROM therapist_insurance ti
            JOIN insurance_payers p ON p.id = ti.insurance_payer_id
            WHERE ti.therapist_id = ANY($1)
            ORDER BY ti.therapist_id, p.name, p.id
            "#,
        )
        .bind(therapist_ids)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Returns `true` when a row was written
    pub async fn insert_if_absent(&mut self, therapist: &Therapist) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO therapists (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(therapist.id.as_str())
        .bind(&therapist.name)
        .bind(therapist.created_at)
        .bind(therapist.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Links a therapist to a payer unless the pair already exists
    pub async fn link_if_absent(&mut self, link: &TherapistInsurance) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO therapist_insurance (therapist_id, insurance_payer_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (therapist_id, insurance_payer_id) DO NOTHING
            "#,
        )
        .bind(link.therapist_id.as_str())
        .bind(link.insurance_payer_id.as_str())
        .bind(link.created_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
