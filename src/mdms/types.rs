//! MDMS request/response envelope and the organizational hierarchy tree.
//!
//! The search envelope is the standard eGov shape: a `RequestInfo` header
//! plus `MdmsCriteria` naming a module and the masters wanted. Responses come
//! back as `{ MdmsRes: { <module>: { <master>: [entries] } } }`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request envelope
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub api_id: &'static str,
    pub ver: f64,
    pub ts: &'static str,
    pub action: &'static str,
    pub did: u32,
    pub key: &'static str,
    pub msg_id: &'static str,
}

impl Default for RequestInfo {
    fn default() -> Self {
        Self {
            api_id: "mgramseva-common",
            ver: 0.01,
            ts: "",
            action: "_search",
            did: 1,
            key: "",
            msg_id: "",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MasterDetail {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetail {
    pub module_name: String,
    pub master_details: Vec<MasterDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MdmsCriteria {
    pub tenant_id: String,
    pub module_details: Vec<ModuleDetail>,
}

#[derive(Debug, Serialize)]
pub struct MdmsRequest {
    #[serde(rename = "RequestInfo")]
    pub request_info: RequestInfo,
    #[serde(rename = "MdmsCriteria")]
    pub criteria: MdmsCriteria,
}

impl MdmsRequest {
    /// Search request for a single master within a module.
    pub fn search(tenant_id: &str, module: &str, master: &str) -> Self {
        Self {
            request_info: RequestInfo::default(),
            criteria: MdmsCriteria {
                tenant_id: tenant_id.to_string(),
                module_details: vec![ModuleDetail {
                    module_name: module.to_string(),
                    master_details: vec![MasterDetail {
                        name: master.to_string(),
                    }],
                }],
            },
        }
    }
}

// ============================================================================
// Hierarchy response (module "tenant", master "projectmodule")
// ============================================================================
//
// Missing keys anywhere in the tree fail deserialization; a partial
// hierarchy is unusable downstream, so that failure is fatal for the run.

#[derive(Debug, Deserialize)]
pub struct HierarchyResponse {
    #[serde(rename = "MdmsRes")]
    pub mdms_res: HierarchyRes,
}

#[derive(Debug, Deserialize)]
pub struct HierarchyRes {
    pub tenant: HierarchyMasters,
}

#[derive(Debug, Deserialize)]
pub struct HierarchyMasters {
    pub projectmodule: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
pub struct Zone {
    pub name: String,
    pub circle: Vec<Circle>,
}

#[derive(Debug, Deserialize)]
pub struct Circle {
    pub name: String,
    pub division: Vec<Division>,
}

#[derive(Debug, Deserialize)]
pub struct Division {
    pub name: String,
    pub subdivision: Vec<Subdivision>,
}

#[derive(Debug, Deserialize)]
pub struct Subdivision {
    pub name: String,
    pub section: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub struct Section {
    pub name: String,
    pub project: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub name: String,
    pub code: String,
}

// ============================================================================
// Billing slab response (module "ws-services-calculation", master "WCBillingSlab")
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BillingSlabResponse {
    #[serde(rename = "MdmsRes")]
    pub mdms_res: BillingSlabRes,
}

#[derive(Debug, Deserialize)]
pub struct BillingSlabRes {
    #[serde(rename = "ws-services-calculation")]
    pub ws_services_calculation: BillingSlabMasters,
}

#[derive(Debug, Deserialize)]
pub struct BillingSlabMasters {
    // Slab entries are opaque here; only their count is reported.
    #[serde(rename = "WCBillingSlab")]
    pub wc_billing_slab: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_serializes_with_egov_field_names() {
        let request = MdmsRequest::search("pb", "tenant", "projectmodule");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["RequestInfo"]["apiId"], "mgramseva-common");
        assert_eq!(value["RequestInfo"]["action"], "_search");
        assert_eq!(value["MdmsCriteria"]["tenantId"], "pb");
        assert_eq!(
            value["MdmsCriteria"]["moduleDetails"][0]["moduleName"],
            "tenant"
        );
        assert_eq!(
            value["MdmsCriteria"]["moduleDetails"][0]["masterDetails"][0]["name"],
            "projectmodule"
        );
    }

    #[test]
    fn hierarchy_response_rejects_missing_keys() {
        let missing_envelope = serde_json::json!({ "tenant": {} });
        assert!(serde_json::from_value::<HierarchyResponse>(missing_envelope).is_err());

        let missing_circle = serde_json::json!({
            "MdmsRes": { "tenant": { "projectmodule": [ { "name": "Zone 1" } ] } }
        });
        assert!(serde_json::from_value::<HierarchyResponse>(missing_circle).is_err());
    }
}
