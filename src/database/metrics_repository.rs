//! Per-tenant operational metric queries.
//!
//! The fourteen SQL-backed metrics are one data-driven table of definitions
//! executed by a single routine, instead of fourteen near-identical query
//! functions. Each definition names its dashboard column, its result shape
//! (count, sum, or max creation time) and the SQL, which always takes the
//! tenant id as `$1`.
//!
//! SQL aggregate nulls pass through unchanged: a tenant with no matching rows
//! gets `None`, never zero. A failed query logs the cause, records the metric
//! as unavailable and never aborts the tenant or the run.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;

use crate::localtime::ist_from_epoch_millis;

/// Result shape of a metric query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// `count(...)` over matching rows
    Count,
    /// `sum(...)` of a monetary amount
    Sum,
    /// `max(createdtime)` as epoch milliseconds, converted to an IST date/time
    MaxDate,
}

/// One SQL-backed metric definition.
pub struct MetricDef {
    /// Dashboard column this metric populates
    pub name: &'static str,
    pub kind: MetricKind,
    pub sql: &'static str,
}

/// The operational-store metrics, in dashboard column order. The fifteenth
/// metric (`billing_slab_count`) comes from MDMS, not from here.
pub const SQL_METRICS: [MetricDef; 14] = [
    MetricDef {
        name: "consumer_created_count",
        kind: MetricKind::Count,
        sql: "SELECT count(*) FROM eg_ws_connection \
              WHERE status = 'Active' AND tenantid = $1",
    },
    MetricDef {
        name: "last_demand_gen_date",
        kind: MetricKind::MaxDate,
        sql: "SELECT max(createdtime) FROM egbs_demand_v1 WHERE tenantid = $1",
    },
    MetricDef {
        name: "collection_till_date",
        kind: MetricKind::Sum,
        sql: "SELECT sum(amountpaid) FROM egcl_paymentdetail \
              WHERE businessservice = 'WS' AND tenantid = $1",
    },
    MetricDef {
        name: "collection_till_date_online",
        kind: MetricKind::Sum,
        sql: "SELECT sum(pd.amountpaid) FROM egcl_payment p \
              JOIN egcl_paymentdetail pd ON p.id = pd.paymentid \
              WHERE pd.businessservice = 'WS' AND p.tenantid = $1 \
                AND p.paymentmode = 'ONLINE'",
    },
    MetricDef {
        name: "last_collection_date",
        kind: MetricKind::MaxDate,
        sql: "SELECT max(createdtime) FROM egcl_paymentdetail \
              WHERE businessservice = 'WS' AND tenantid = $1",
    },
    MetricDef {
        name: "expense_count",
        kind: MetricKind::Count,
        sql: "SELECT count(*) FROM eg_echallan WHERE tenantid = $1",
    },
    MetricDef {
        name: "last_expense_txn_date",
        kind: MetricKind::MaxDate,
        sql: "SELECT max(createdtime) FROM eg_echallan WHERE tenantid = $1",
    },
    MetricDef {
        name: "paid_status_expense_bill_count",
        kind: MetricKind::Count,
        sql: "SELECT count(*) FROM eg_echallan \
              WHERE tenantid = $1 AND applicationstatus = 'PAID'",
    },
    MetricDef {
        name: "demands_till_date_count",
        kind: MetricKind::Count,
        sql: "SELECT count(*) FROM egbs_demand_v1 \
              WHERE businessservice = 'WS' AND status = 'ACTIVE' AND tenantid = $1",
    },
    MetricDef {
        name: "ratings_count",
        kind: MetricKind::Count,
        sql: "SELECT count(*) FROM eg_ws_feedback WHERE tenantid = $1",
    },
    MetricDef {
        name: "last_rating_date",
        kind: MetricKind::MaxDate,
        sql: "SELECT max(createdtime) FROM eg_ws_feedback WHERE tenantid = $1",
    },
    MetricDef {
        name: "active_users_count",
        kind: MetricKind::Count,
        sql: "SELECT count(DISTINCT u.id) FROM eg_user u \
              JOIN eg_userrole_v1 ur ON u.id = ur.user_id \
              WHERE u.active = 't' AND u.type = 'EMPLOYEE' \
                AND ur.role_code = 'EMPLOYEE' AND ur.role_tenantid = $1",
    },
    MetricDef {
        name: "total_advance",
        kind: MetricKind::Sum,
        sql: "SELECT sum(dd.taxamount) FROM egbs_demanddetail_v1 dd \
              JOIN egbs_demand_v1 d ON dd.demandid = d.id \
              WHERE d.status = 'ACTIVE' \
                AND dd.taxheadcode = 'WS_ADVANCE_CARRYFORWARD' \
                AND dd.tenantid = $1",
    },
    MetricDef {
        name: "total_penalty",
        kind: MetricKind::Sum,
        sql: "SELECT sum(dd.taxamount) FROM egbs_demanddetail_v1 dd \
              JOIN egbs_demand_v1 d ON dd.demandid = d.id \
              WHERE d.status = 'ACTIVE' \
                AND dd.taxheadcode = 'WS_TIME_PENALTY' \
                AND dd.tenantid = $1",
    },
];

/// A single fetched metric value, shaped by its [`MetricKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue {
    Count(Option<i64>),
    Sum(Option<Decimal>),
    Date(Option<NaiveDateTime>),
}

/// Fixed-shape metrics record for one tenant. Every field is nullable: SQL
/// aggregates over zero rows and failed sub-operations both yield `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantMetrics {
    pub consumer_created_count: Option<i64>,
    pub billing_slab_count: Option<i64>,
    pub last_demand_gen_date: Option<NaiveDateTime>,
    pub collection_till_date: Option<Decimal>,
    pub collection_till_date_online: Option<Decimal>,
    pub last_collection_date: Option<NaiveDateTime>,
    pub expense_count: Option<i64>,
    pub last_expense_txn_date: Option<NaiveDateTime>,
    pub paid_status_expense_bill_count: Option<i64>,
    pub demands_till_date_count: Option<i64>,
    pub ratings_count: Option<i64>,
    pub last_rating_date: Option<NaiveDateTime>,
    pub active_users_count: Option<i64>,
    pub total_advance: Option<Decimal>,
    pub total_penalty: Option<Decimal>,
}

impl TenantMetrics {
    /// Assign a fetched value into its column slot.
    fn set(&mut self, name: &str, value: MetricValue) {
        use MetricValue::{Count, Date, Sum};

        match (name, value) {
            ("consumer_created_count", Count(v)) => self.consumer_created_count = v,
            ("last_demand_gen_date", Date(v)) => self.last_demand_gen_date = v,
            ("collection_till_date", Sum(v)) => self.collection_till_date = v,
            ("collection_till_date_online", Sum(v)) => self.collection_till_date_online = v,
            ("last_collection_date", Date(v)) => self.last_collection_date = v,
            ("expense_count", Count(v)) => self.expense_count = v,
            ("last_expense_txn_date", Date(v)) => self.last_expense_txn_date = v,
            ("paid_status_expense_bill_count", Count(v)) => {
                self.paid_status_expense_bill_count = v
            }
            ("demands_till_date_count", Count(v)) => self.demands_till_date_count = v,
            ("ratings_count", Count(v)) => self.ratings_count = v,
            ("last_rating_date", Date(v)) => self.last_rating_date = v,
            ("active_users_count", Count(v)) => self.active_users_count = v,
            ("total_advance", Sum(v)) => self.total_advance = v,
            ("total_penalty", Sum(v)) => self.total_penalty = v,
            (name, value) => {
                debug_assert!(false, "unmapped metric assignment: {name} <- {value:?}");
            }
        }
    }
}

/// One failed sub-operation, reported in the end-of-run summary.
#[derive(Debug, Clone)]
pub struct MetricFailure {
    pub metric: &'static str,
    pub error: String,
}

/// Read-only repository over the operational tables.
pub struct MetricsRepository {
    pool: PgPool,
}

impl MetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collect all SQL-backed metrics for one tenant.
    ///
    /// Sub-operations run sequentially and independently; each failure is
    /// logged, returned in the failure list, and leaves its field `None`.
    pub async fn collect(&self, tenant_id: &str) -> (TenantMetrics, Vec<MetricFailure>) {
        let mut metrics = TenantMetrics::default();
        let mut failures = Vec::new();

        for def in &SQL_METRICS {
            match self.fetch(def, tenant_id).await {
                Ok(value) => metrics.set(def.name, value),
                Err(e) => {
                    warn!(
                        tenant = tenant_id,
                        metric = def.name,
                        error = %e,
                        "metric query failed; recording as unavailable"
                    );
                    failures.push(MetricFailure {
                        metric: def.name,
                        error: e.to_string(),
                    });
                }
            }
        }

        (metrics, failures)
    }

    async fn fetch(&self, def: &MetricDef, tenant_id: &str) -> Result<MetricValue, sqlx::Error> {
        match def.kind {
            MetricKind::Count => {
                let count: Option<i64> = sqlx::query_scalar(def.sql)
                    .bind(tenant_id)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(MetricValue::Count(count))
            }
            MetricKind::Sum => {
                let sum: Option<Decimal> = sqlx::query_scalar(def.sql)
                    .bind(tenant_id)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(MetricValue::Sum(sum))
            }
            MetricKind::MaxDate => {
                let millis: Option<i64> = sqlx::query_scalar(def.sql)
                    .bind(tenant_id)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(MetricValue::Date(millis.and_then(ist_from_epoch_millis)))
            }
        }
    }
}
