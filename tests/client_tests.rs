//! HTTP tests for the Cloudflare client
//!
//! A local wiremock server stands in for the v4 API.

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloud_mcp_servers::cloudflare::client::{CloudflareApi, RequestBody};
use cloud_mcp_servers::cloudflare::CloudflareClient;
use cloud_mcp_servers::config::CloudflareConfig;
use cloud_mcp_servers::error::{CloudMcpError, CloudflareApiError};

fn client(server: &MockServer) -> CloudflareClient {
    CloudflareClient::new(CloudflareConfig::new("test-token", server.uri()).unwrap())
}

fn envelope(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    }))
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(envelope(json!([{"id": "acct1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).get("/accounts").await.unwrap();
    assert_eq!(result[0]["id"], "acct1");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_delete_drops_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/zones/z1/dns_records/rec1"))
        .respond_with(envelope(json!({"id": "rec1"})))
        .mount(&server)
        .await;

    client(&server)
        .request(
            Method::DELETE,
            "/zones/z1/dns_records/rec1",
            Some(RequestBody::Json(json!({"ignored": true}))),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let record = json!({"type": "A", "name": "www", "content": "203.0.113.10", "ttl": 1, "proxied": true});

    Mock::given(method("POST"))
        .and(path("/zones/z1/dns_records"))
        .and(header("content-type", "application/json"))
        .and(body_json(&record))
        .respond_with(envelope(json!({"id": "rec1", "type": "A", "name": "www", "content": "203.0.113.10"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .post("/zones/z1/dns_records", record.clone())
        .await
        .unwrap();
    assert_eq!(result["id"], "rec1");
}

#[tokio::test]
async fn test_put_text_body_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/accounts/acct1/storage/kv/namespaces/ns1/values/greeting"))
        .and(query_param("expiration_ttl", "60"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello"))
        .respond_with(envelope(serde_json::Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .request(
            Method::PUT,
            "/accounts/acct1/storage/kv/namespaces/ns1/values/greeting?expiration_ttl=60",
            Some(RequestBody::Text("hello".to_string())),
        )
        .await
        .unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_unsuccessful_envelope_reports_first_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/z1/firewall/rules"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [{"code": 10000, "message": "Authentication error"}],
            "messages": [],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .post("/zones/z1/firewall/rules", json!({"action": "block"}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Cloudflare API error: Authentication error");
}

#[tokio::test]
async fn test_unsuccessful_envelope_without_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones/z1/analytics/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = client(&server)
        .get("/zones/z1/analytics/dashboard")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Cloudflare API error: Unknown error");
}

#[tokio::test]
async fn test_non_json_body_is_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get("/accounts").await.unwrap_err();
    match err {
        CloudMcpError::Cloudflare(CloudflareApiError::UnexpectedResponse { message }) => {
            assert!(message.contains("502"), "{}", message);
            assert!(message.contains("Bad gateway"), "{}", message);
        }
        other => panic!("expected an unexpected-response error, got {:?}", other),
    }
}
