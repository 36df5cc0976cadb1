//! Dashboard snapshot table lifecycle and row writes.
//!
//! The dashboard is a full snapshot: `reset_table` drops and recreates
//! `roll_out_dashboard` at the start of every run, then one `insert_row` per
//! tenant fills it. There is no history and no upsert; the table is always
//! empty before the first insert of a run.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::database::metrics_repository::TenantMetrics;
use crate::error::Result;
use crate::hierarchy::TenantDescriptor;

const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS roll_out_dashboard";

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE roll_out_dashboard (
    tenantid varchar(250) NOT NULL,
    projectcode varchar(66),
    zone varchar(250),
    circle varchar(250),
    division varchar(250),
    subdivision varchar(250),
    section varchar(250),
    consumer_created_count NUMERIC(10),
    billing_slab_count NUMERIC(10),
    last_demand_gen_date DATE,
    collection_till_date NUMERIC(12, 2),
    collection_till_date_online NUMERIC(12, 2),
    last_collection_date DATE,
    expense_count BIGINT,
    last_expense_txn_date DATE,
    paid_status_expense_bill_count NUMERIC(10),
    demands_till_date_count NUMERIC(10),
    ratings_count NUMERIC(10),
    last_rating_date DATE,
    active_users_count NUMERIC(10),
    total_advance NUMERIC(10),
    total_penalty NUMERIC(10),
    createdtime TIMESTAMP NOT NULL
)";

const INSERT_ROW_SQL: &str = "\
INSERT INTO roll_out_dashboard (
    tenantid, projectcode, zone, circle, division, subdivision, section,
    consumer_created_count, billing_slab_count, last_demand_gen_date,
    collection_till_date, collection_till_date_online, last_collection_date,
    expense_count, last_expense_txn_date, paid_status_expense_bill_count,
    demands_till_date_count, ratings_count, last_rating_date,
    active_users_count, total_advance, total_penalty, createdtime
) VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
)";

/// Writer for the dashboard snapshot table.
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop the dashboard table if present and recreate it empty.
    ///
    /// Destructive and not transactional with the inserts that follow; any
    /// failure here aborts the run before a single row is written. Calling
    /// twice in a row leaves the table present with zero rows.
    pub async fn reset_table(&self) -> Result<()> {
        sqlx::query(DROP_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert one dashboard row for a tenant.
    pub async fn insert_row(
        &self,
        tenant: &TenantDescriptor,
        metrics: &TenantMetrics,
        created_time: NaiveDateTime,
    ) -> Result<()> {
        sqlx::query(INSERT_ROW_SQL)
            .bind(&tenant.tenant_id)
            .bind(&tenant.project_code)
            .bind(&tenant.zone)
            .bind(&tenant.circle)
            .bind(&tenant.division)
            .bind(&tenant.subdivision)
            .bind(&tenant.section)
            .bind(metrics.consumer_created_count)
            .bind(metrics.billing_slab_count)
            .bind(metrics.last_demand_gen_date.map(|dt| dt.date()))
            .bind(metrics.collection_till_date)
            .bind(metrics.collection_till_date_online)
            .bind(metrics.last_collection_date.map(|dt| dt.date()))
            .bind(metrics.expense_count)
            .bind(metrics.last_expense_txn_date.map(|dt| dt.date()))
            .bind(metrics.paid_status_expense_bill_count)
            .bind(metrics.demands_till_date_count)
            .bind(metrics.ratings_count)
            .bind(metrics.last_rating_date.map(|dt| dt.date()))
            .bind(metrics.active_users_count)
            .bind(metrics.total_advance)
            .bind(metrics.total_penalty)
            .bind(created_time)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
