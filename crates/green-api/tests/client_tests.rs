//! HTTP-level tests for `GreenClient` against a wiremock gateway.
//!
//! Run:
//!   cargo test -p green-api --test client_tests

use green_api::{Gateway, GreenApiError, GreenClient, GreenConfig, Method};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE: &str = "1101000001";
const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> GreenClient {
    GreenClient::new(GreenConfig::with_credentials(server.uri(), INSTANCE, TOKEN)).unwrap()
}

fn endpoint_path(endpoint: &str) -> String {
    format!("/waInstance{}/{}/{}", INSTANCE, endpoint, TOKEN)
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .and(body_json(json!({ "chatId": "34600000000@c.us", "message": "hola" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "idMessage": "BAE5F4" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.send_message("34600000000@c.us", "hola").await.unwrap();
    assert_eq!(response.id_message.as_deref(), Some("BAE5F4"));
}

#[tokio::test]
async fn test_get_sends_data_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint_path("lastIncomingMessages")))
        .and(query_param("minutes", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .call(Method::GET, "lastIncomingMessages", Some(&json!({ "minutes": 60 })))
        .await
        .unwrap();
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_empty_body_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(endpoint_path("deleteNotification/5")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .call(Method::DELETE, "deleteNotification/5", None)
        .await
        .unwrap();
    assert!(value.is_null());
    client.delete_notification(5).await.unwrap();
}

#[tokio::test]
async fn test_null_notification_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint_path("receiveNotification")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.receive_notification().await.unwrap().is_none());
}

#[tokio::test]
async fn test_not_found_preserves_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint_path("receiveNotification")))
        .respond_with(ResponseTemplate::new(404).set_body_string("queue is empty"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.receive_notification().await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        GreenApiError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "queue is empty");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_error_detail_from_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Validation failed" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send_message("bad", "hola").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail().as_deref(), Some(r#"{"message":"Validation failed"}"#));
}

#[tokio::test]
async fn test_non_json_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint_path("getStateInstance")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .call(Method::GET, "getStateInstance", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GreenApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 1 is reserved and nothing listens on it.
    let config = GreenConfig::with_credentials("http://127.0.0.1:1", INSTANCE, TOKEN);
    let client = GreenClient::new(config).unwrap();

    let err = client.receive_notification().await.unwrap_err();
    assert!(matches!(err, GreenApiError::Network(_)));
    assert!(!err.to_string().contains(TOKEN));
}

#[tokio::test]
async fn test_missing_credentials_fail_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GreenClient::new(GreenConfig::new(server.uri())).unwrap();
    let err = client.send_message("34600000000@c.us", "hola").await.unwrap_err();
    assert!(matches!(err, GreenApiError::Configuration(_)));
}
