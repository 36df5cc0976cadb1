//! Error handling for the rollout dashboard job.
//!
//! Two severities exist at the call sites: table reset and hierarchy fetch
//! failures are fatal for the run; individual metric query failures are
//! recorded per tenant/metric and the run continues.

use thiserror::Error;

/// Main error type for the rollout dashboard job
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Missing or invalid configuration variable '{var}'")]
    Config { var: String },

    #[error("Master-data service error: {0}")]
    DataSource(#[from] reqwest::Error),

    #[error("Malformed master-data response: {context}")]
    MalformedResponse { context: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    /// Shorthand for envelope/key failures while decoding an MDMS response.
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
        }
    }
}
