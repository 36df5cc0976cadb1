//! MDMS master-data service client.
//!
//! Thin HTTP client over the eGov MDMS `_search` endpoint. Two masters are
//! queried: the `projectmodule` organizational hierarchy (once per run, under
//! the configured tenant scope) and `WCBillingSlab` (once per tenant).

pub mod types;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DashboardError, Result};
use types::{BillingSlabResponse, HierarchyResponse, MdmsRequest, Zone};

const MDMS_SEARCH_PATH: &str = "egov-mdms-service/v1/_search";

pub struct MdmsClient {
    client: Client,
    base_url: String,
    tenant_scope: String,
}

impl MdmsClient {
    /// Build a client with a fixed request timeout so an unresponsive
    /// master-data service fails the run instead of hanging it.
    pub fn new(base_url: &str, tenant_scope: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_scope: tenant_scope.to_string(),
        })
    }

    /// Fetch the full organizational hierarchy for the configured scope.
    ///
    /// Single synchronous call, no pagination or retry. Transport failures
    /// and missing envelope keys are both fatal for the run.
    pub async fn fetch_hierarchy(&self) -> Result<Vec<Zone>> {
        let parsed: HierarchyResponse = self
            .search(&self.tenant_scope, "tenant", "projectmodule")
            .await?;
        Ok(parsed.mdms_res.tenant.projectmodule)
    }

    /// Count the billing-slab master entries configured for a tenant.
    pub async fn billing_slab_count(&self, tenant_id: &str) -> Result<i64> {
        let parsed: BillingSlabResponse = self
            .search(tenant_id, "ws-services-calculation", "WCBillingSlab")
            .await?;
        Ok(parsed.mdms_res.ws_services_calculation.wc_billing_slab.len() as i64)
    }

    async fn search<T: DeserializeOwned>(
        &self,
        tenant_id: &str,
        module: &str,
        master: &str,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, MDMS_SEARCH_PATH);
        debug!(%url, module, master, tenant = tenant_id, "MDMS search");

        let request = MdmsRequest::search(tenant_id, module, master);
        let body = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|e| {
            DashboardError::malformed(format!("{module}/{master} search: {e}"))
        })
    }
}
