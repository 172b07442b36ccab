//! Insurance payer queries

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use core_kernel::PayerId;
use domain_scheduling::{InsurancePayer, PayerSummary};

use crate::error::DatabaseError;

/// Full row of `insurance_payers`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayerRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PayerRow> for InsurancePayer {
    fn from(row: PayerRow) -> Self {
        InsurancePayer {
            id: PayerId::new(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The `{id, name}` projection used by listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayerSummaryRow {
    pub id: String,
    pub name: String,
}

impl From<PayerSummaryRow> for PayerSummary {
    fn from(row: PayerSummaryRow) -> Self {
        PayerSummary::new(row.id, row.name)
    }
}

/// Queries against `insurance_payers`
pub struct PayerRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PayerRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Every payer ordered by name, ties broken by id
    pub async fn list_summaries(&mut self) -> Result<Vec<PayerSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PayerSummaryRow>(
            r#"
            SELECT id, name
            FROM insurance_payers
            ORDER BY name, id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    pub async fn get(&mut self, id: &PayerId) -> Result<Option<PayerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PayerRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM insurance_payers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }

    /// Inserts a payer unless one with the same id exists
    ///
    /// Returns `true` when a row was written.
    pub async fn insert_if_absent(&mut self, payer: &InsurancePayer) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO insurance_payers (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(payer.id.as_str())
        .bind(&payer.name)
        .bind(payer.created_at)
        .bind(payer.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
