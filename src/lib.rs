//! Water-supply rollout dashboard batch job.
//!
//! Rebuilds the `roll_out_dashboard` reporting table: one summary row per
//! administrative tenant (village/project), replacing the previous snapshot
//! entirely on each run. Tenants come from the MDMS master-data hierarchy
//! (zone > circle > division > subdivision > section > project); metrics come
//! from the operational PostgreSQL tables plus one MDMS billing-slab lookup.
//!
//! Pipeline: reset table -> fetch hierarchy -> flatten to tenant list ->
//! per-tenant metric collection -> one insert per tenant.

pub mod config;
pub mod database;
pub mod error;
pub mod hierarchy;
pub mod localtime;
pub mod mdms;
pub mod rollout;

pub use config::AppConfig;
pub use error::{DashboardError, Result};
pub use hierarchy::TenantDescriptor;
