//! Request/response envelope tests

use serde_json::json;

use crate::common::{assert_error, assert_ranked, assert_success, TestServer};

// ============================================================================
// Success envelopes
// ============================================================================

#[tokio::test]
async fn test_python_snippet_gets_ranked_predictions() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client.request(&json!({"content": "print('hi')"})).await;
    let data = assert_success(&response);

    assert!(!data.is_empty(), "Expected at least one prediction");
    assert!(data.len() <= 10, "Too many predictions: {}", data.len());
    assert_ranked(data);
}

#[tokio::test]
async fn test_empty_content_echoes_request_id() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "", "requestId": 42}))
        .await;

    assert_eq!(response, json!({"data": [], "requestId": 42}));
}

#[tokio::test]
async fn test_passthrough_fields_are_echoed_in_order() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({
            "id": "abc",
            "content": "fn main() {}",
            "model": "vscode-languagedetection",
            "bias": {},
            "meta": {"file": "main.rs", "line": 1}
        }))
        .await;

    let object = response.as_object().expect("response is an object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["data", "id", "meta"]);
    assert_eq!(response["meta"], json!({"file": "main.rs", "line": 1}));
}

#[tokio::test]
async fn test_reserved_fields_are_not_echoed() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "", "data": [1, 2], "error": "spoofed", "n": 1}))
        .await;

    assert_eq!(response, json!({"data": [], "n": 1}));
}

#[tokio::test]
async fn test_passthrough_numbers_are_echoed_verbatim() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client
        .send_text(r#"{"content":"","id":123456789012345678901234,"f":1.10}"#)
        .await;
    let raw = client.recv_text().await;

    assert_eq!(raw, r#"{"data":[],"id":123456789012345678901234,"f":1.10}"#);
}

// ============================================================================
// Error envelopes
// ============================================================================

#[tokio::test]
async fn test_invalid_json_gets_error_and_connection_survives() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_text("not json").await;
    let response = client.recv_json().await;
    let message = assert_error(&response);
    assert!(
        message.contains("Malformed request"),
        "Unexpected error message: {}",
        message
    );

    let response = client.request(&json!({"content": "", "id": 2})).await;
    assert_eq!(response, json!({"data": [], "id": 2}));
}

#[tokio::test]
async fn test_missing_content_is_an_error_without_passthrough() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client.request(&json!({"requestId": 7})).await;
    let message = assert_error(&response);
    assert!(message.contains("content"), "Unexpected error message: {}", message);
}

#[tokio::test]
async fn test_non_string_content_is_an_error() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client.request(&json!({"content": 12})).await;
    assert_error(&response);
}

#[tokio::test]
async fn test_non_object_request_is_an_error() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client.request(&json!(["content", "x"])).await;
    assert_error(&response);
}
