//! Fetch gateway tests using wiremock.
//!
//! These tests verify that the ApiClient classifies transport, protocol,
//! and network failures the way the view layer expects.

use hurricane_landfall_cli::api::{ApiClient, FetchError, INVALID_RESPONSE};
use hurricane_landfall_cli::model::ClientConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url: uri.to_string(),
        user_agent: "hurricane-landfall-cli/test".to_string(),
    })
    .expect("client should build")
}

fn record_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "year": 1950,
        "month": 9,
        "day": "5",
        "wind": 105,
        "latitude": 28.5,
        "longitude": -82.7
    })
}

#[tokio::test]
async fn fetch_returns_records_in_server_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [record_json("EASY"), record_json("KING")]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let records = client.fetch_florida_landfalls().await.expect("records");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "EASY");
    assert_eq!(records[1].name, "KING");
    assert_eq!(records[0].day, "5");
}

#[tokio::test]
async fn empty_data_is_a_successful_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": []})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let records = client.fetch_florida_landfalls().await.expect("records");
    assert!(records.is_empty());
}

#[tokio::test]
async fn non_2xx_classifies_as_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.fetch_florida_landfalls().await.unwrap_err();

    match err {
        FetchError::Http { status } => assert_eq!(status, 500),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn envelope_failure_surfaces_error_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "X"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.fetch_florida_landfalls().await.unwrap_err();
    assert_eq!(err.to_string(), "X");
}

#[tokio::test]
async fn envelope_failure_without_text_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.fetch_florida_landfalls().await.unwrap_err();
    assert_eq!(err.to_string(), INVALID_RESPONSE);
}

#[tokio::test]
async fn body_without_success_field_is_a_protocol_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.fetch_florida_landfalls().await.unwrap_err();
    assert_eq!(err.to_string(), INVALID_RESPONSE);
}

#[tokio::test]
async fn non_json_body_is_a_protocol_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hurricanes/landfall/florida"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.fetch_florida_landfalls().await.unwrap_err();
    match &err {
        FetchError::Api { message } => assert_eq!(message, INVALID_RESPONSE),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_classifies_as_network_error() {
    // Nothing listens on the discard port; the request never completes.
    let client = client_for("http://127.0.0.1:9");
    let err = client.fetch_florida_landfalls().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn export_ack_ignores_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export_csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "CSV exported successfully to florida_landfall_hurricanes.csv",
            "rows": 25
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    assert!(client.request_csv_export().await.is_ok());
}

#[tokio::test]
async fn export_failure_surfaces_error_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export_csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "disk full"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client.request_csv_export().await.unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}
