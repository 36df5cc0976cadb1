//! MDMS client tests against a mock HTTP server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rollout_dashboard::hierarchy;
use rollout_dashboard::mdms::MdmsClient;
use rollout_dashboard::DashboardError;

const SEARCH_PATH: &str = "/egov-mdms-service/v1/_search";

fn hierarchy_body() -> serde_json::Value {
    json!({
        "MdmsRes": {
            "tenant": {
                "projectmodule": [
                    {
                        "name": "Zone 1",
                        "circle": [
                            {
                                "name": "Circle 1",
                                "division": [
                                    {
                                        "name": "Division 1",
                                        "subdivision": [
                                            {
                                                "name": "Subdivision 1",
                                                "section": [
                                                    {
                                                        "name": "Section 1",
                                                        "project": [
                                                            { "name": "North Block", "code": "P001" },
                                                            { "name": "South Block", "code": "P002" }
                                                        ]
                                                    }
                                                ]
                                            }
                                        ]
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    })
}

fn client_for(server: &MockServer) -> MdmsClient {
    MdmsClient::new(&server.uri(), "pb", Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn fetch_hierarchy_flattens_to_leaf_projects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_partial_json(json!({
            "RequestInfo": { "apiId": "mgramseva-common", "action": "_search" },
            "MdmsCriteria": {
                "tenantId": "pb",
                "moduleDetails": [
                    { "moduleName": "tenant", "masterDetails": [ { "name": "projectmodule" } ] }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(hierarchy_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let zones = client.fetch_hierarchy().await.expect("hierarchy fetch");
    let tenants = hierarchy::flatten(&zones);

    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0].tenant_id, "pb.northblock");
    assert_eq!(tenants[1].tenant_id, "pb.southblock");
    assert_eq!(tenants[0].zone, tenants[1].zone);
    assert_eq!(tenants[0].section, tenants[1].section);
}

#[tokio::test]
async fn missing_mdms_res_key_is_a_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResponseInfo": { "status": "successful" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.fetch_hierarchy().await {
        Err(DashboardError::MalformedResponse { context }) => {
            assert!(context.contains("tenant/projectmodule"), "context: {context}");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_surfaces_as_data_source_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_hierarchy().await,
        Err(DashboardError::DataSource(_))
    ));
}

#[tokio::test]
async fn billing_slab_count_is_the_master_entry_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_partial_json(json!({
            "MdmsCriteria": {
                "tenantId": "pb.northblock",
                "moduleDetails": [
                    {
                        "moduleName": "ws-services-calculation",
                        "masterDetails": [ { "name": "WCBillingSlab" } ]
                    }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MdmsRes": {
                "ws-services-calculation": {
                    "WCBillingSlab": [
                        { "code": "1" }, { "code": "2" }, { "code": "3" }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let count = client
        .billing_slab_count("pb.northblock")
        .await
        .expect("slab count");
    assert_eq!(count, 3);
}

#[tokio::test]
async fn empty_billing_slab_list_counts_zero() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MdmsRes": { "ws-services-calculation": { "WCBillingSlab": [] } }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.billing_slab_count("pb.empty").await.unwrap(), 0);
}
