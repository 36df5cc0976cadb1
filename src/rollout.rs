//! Run orchestration.
//!
//! Sequences one full snapshot rebuild: reset table, fetch hierarchy, then a
//! single-threaded pass over the tenants collecting metrics and writing rows.
//! Table reset and hierarchy fetch failures are fatal; everything after that
//! is per-tenant and only lands in the end-of-run summary.

use tracing::{info, warn};

use crate::database::{DatabaseManager, MetricsRepository, SnapshotRepository, TenantMetrics};
use crate::error::Result;
use crate::hierarchy::{self, TenantDescriptor};
use crate::localtime;
use crate::mdms::MdmsClient;

/// One failed per-tenant sub-operation (metric query, billing-slab lookup,
/// or row insert).
#[derive(Debug, Clone)]
pub struct TenantFailure {
    pub tenant_id: String,
    pub operation: String,
    pub error: String,
}

/// Outcome of a completed run. A run reaching this point processed every
/// tenant; partial per-tenant failures are listed, not fatal.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub tenants_discovered: usize,
    pub rows_written: usize,
    pub failures: Vec<TenantFailure>,
}

impl RunSummary {
    /// Log the end-of-run report: totals plus one line per failed
    /// tenant/operation pair.
    pub fn log_report(&self) {
        info!(
            tenants = self.tenants_discovered,
            rows_written = self.rows_written,
            failed_operations = self.failures.len(),
            "rollout dashboard run complete"
        );

        for failure in &self.failures {
            warn!(
                tenant = %failure.tenant_id,
                operation = %failure.operation,
                error = %failure.error,
                "sub-operation failed during run"
            );
        }
    }
}

/// Execute one snapshot rebuild.
pub async fn run(mdms: &MdmsClient, db: &DatabaseManager) -> Result<RunSummary> {
    let snapshots = db.snapshot_repository();
    let metrics_repo = db.metrics_repository();

    // Fatal failure domain: without a destination table or a tenant list the
    // run cannot proceed meaningfully.
    snapshots.reset_table().await?;
    info!("dashboard table reset");

    let zones = mdms.fetch_hierarchy().await?;
    let tenants = hierarchy::flatten(&zones);
    info!(tenant_count = tenants.len(), "hierarchy flattened");

    let mut summary = RunSummary {
        tenants_discovered: tenants.len(),
        ..RunSummary::default()
    };

    for tenant in &tenants {
        process_tenant(mdms, &metrics_repo, &snapshots, tenant, &mut summary).await;
    }

    Ok(summary)
}

/// Collect all fifteen metrics for one tenant and write its row. Failed
/// metrics stay null in the row; a failed insert skips the tenant.
async fn process_tenant(
    mdms: &MdmsClient,
    metrics_repo: &MetricsRepository,
    snapshots: &SnapshotRepository,
    tenant: &TenantDescriptor,
    summary: &mut RunSummary,
) {
    let (mut metrics, failures) = metrics_repo.collect(&tenant.tenant_id).await;
    for failure in failures {
        summary.failures.push(TenantFailure {
            tenant_id: tenant.tenant_id.clone(),
            operation: failure.metric.to_string(),
            error: failure.error,
        });
    }

    merge_billing_slab_count(mdms, tenant, &mut metrics, summary).await;

    match snapshots
        .insert_row(tenant, &metrics, localtime::ist_now())
        .await
    {
        Ok(()) => summary.rows_written += 1,
        Err(e) => {
            warn!(tenant = %tenant.tenant_id, error = %e, "row insert failed; skipping tenant");
            summary.failures.push(TenantFailure {
                tenant_id: tenant.tenant_id.clone(),
                operation: "insert_row".to_string(),
                error: e.to_string(),
            });
        }
    }
}

/// The one MDMS-sourced metric; handled like any other sub-operation failure.
async fn merge_billing_slab_count(
    mdms: &MdmsClient,
    tenant: &TenantDescriptor,
    metrics: &mut TenantMetrics,
    summary: &mut RunSummary,
) {
    match mdms.billing_slab_count(&tenant.tenant_id).await {
        Ok(count) => metrics.billing_slab_count = Some(count),
        Err(e) => {
            warn!(
                tenant = %tenant.tenant_id,
                error = %e,
                "billing slab lookup failed; recording as unavailable"
            );
            summary.failures.push(TenantFailure {
                tenant_id: tenant.tenant_id.clone(),
                operation: "billing_slab_count".to_string(),
                error: e.to_string(),
            });
        }
    }
}
