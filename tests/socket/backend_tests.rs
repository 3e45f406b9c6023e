//! Backend selection and failure isolation over the socket

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use langdetect_server::backend::{DetectionBackend, RegexpBackend};
use langdetect_server::engine::RegexpRules;
use langdetect_server::socket_server::BackendRegistry;

use crate::common::{assert_error, assert_success, FailingBackend, SleepyBackend, TestServer};

const REGEXP: &str = "vscode-regexp-languagedetection";

// ============================================================================
// Selection
// ============================================================================

#[tokio::test]
async fn test_regexp_backend_returns_single_unestimated_guess() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "<?php\necho $name;\n", "model": REGEXP}))
        .await;

    assert_eq!(
        response,
        json!({"data": [{"languageId": "php", "confidence": -1.0}]})
    );
}

#[tokio::test]
async fn test_regexp_backend_without_guess_returns_empty() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "the quick brown fox", "model": REGEXP, "id": 1}))
        .await;

    assert_eq!(response, json!({"data": [], "id": 1}));
}

#[tokio::test]
async fn test_bias_steers_regexp_backend() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // Exported function syntax matches both JavaScript and TypeScript rules
    let source = "export function add(a, b) {\n  return a + b;\n}\n";

    let response = client
        .request(&json!({"content": source, "model": REGEXP}))
        .await;
    assert_eq!(assert_success(&response)[0]["languageId"], "javascript");

    let response = client
        .request(&json!({
            "content": source,
            "model": REGEXP,
            "bias": {"typescript": 100}
        }))
        .await;

    let data = assert_success(&response);
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["languageId"], "typescript");
}

#[tokio::test]
async fn test_unknown_selector_falls_back_to_default() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "print('hi')", "model": "no-such-backend"}))
        .await;

    let data = assert_success(&response);
    assert!(!data.is_empty());
    assert!(
        data.iter().all(|p| p["confidence"].as_f64() != Some(-1.0)),
        "Default backend should estimate confidences: {}",
        response
    );
}

#[tokio::test]
async fn test_non_string_selector_falls_back_to_default() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "", "model": 3, "id": 5}))
        .await;

    assert_eq!(response, json!({"data": [], "id": 5}));
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn test_backend_failure_then_recovery() {
    let rules = Arc::new(RegexpRules::new().expect("rules compile"));
    let mut registry = BackendRegistry::new(Arc::new(RegexpBackend::new(rules)));
    registry.register(Arc::new(FailingBackend));

    let server = TestServer::with_registry(registry).await;
    let mut client = server.connect().await;

    let response = client
        .request(&json!({"content": "x", "model": "failing", "id": 1}))
        .await;
    let message = assert_error(&response);
    assert!(message.contains("failing"), "Unexpected error message: {}", message);

    let response = client
        .request(&json!({"content": "<?php echo 1;", "id": 2}))
        .await;
    assert_eq!(
        response,
        json!({"data": [{"languageId": "php", "confidence": -1.0}], "id": 2})
    );
}

#[tokio::test]
async fn test_registry_lists_both_selectors() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    for selector in ["vscode-languagedetection", REGEXP] {
        let response = client
            .request(&json!({"content": "", "model": selector}))
            .await;
        assert_eq!(response, json!({"data": []}), "selector {}", selector);
    }
}

#[tokio::test]
async fn test_slow_backend_does_not_block_default() {
    let slow: Arc<dyn DetectionBackend> = Arc::new(SleepyBackend {
        name: "slow",
        delay: Duration::from_millis(500),
    });
    let fast: Arc<dyn DetectionBackend> = Arc::new(SleepyBackend {
        name: "fast",
        delay: Duration::ZERO,
    });
    let mut registry = BackendRegistry::new(fast);
    registry.register(slow);

    let server = TestServer::with_registry(registry).await;
    let mut client = server.connect().await;

    client.send_json(&json!({"content": "a", "model": "slow", "id": 1})).await;
    client.send_json(&json!({"content": "b", "id": 2})).await;

    let first = client.recv_json().await;
    let second = client.recv_json().await;

    assert_eq!(first["id"], 2, "fast request should answer first");
    assert_eq!(first["data"][0]["languageId"], "fast");
    assert_eq!(second["id"], 1);
    assert_eq!(second["data"][0]["languageId"], "slow");
}
