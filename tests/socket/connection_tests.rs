//! Connection lifecycle tests

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use langdetect_server::backend::DetectionBackend;
use langdetect_server::socket_server::BackendRegistry;

use crate::common::{SleepyBackend, StuckBackend, TestServer};

#[tokio::test]
async fn test_greeting_is_first_frame() {
    let server = TestServer::start().await;
    let mut client = server.connect_raw().await;

    match client.recv_message().await {
        Message::Text(text) => assert_eq!(text, "Welcome!"),
        other => panic!("Expected greeting, got {:?}", other),
    }
}

#[tokio::test]
async fn test_each_request_gets_one_response() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    for id in 0..5 {
        client.send_json(&json!({"content": "", "id": id})).await;
    }

    let mut ids = Vec::new();
    for _ in 0..5 {
        let response = client.recv_json().await;
        ids.push(response["id"].as_i64().expect("id echoed"));
    }
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_binary_frame_is_handled_like_text() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client
        .send_message(Message::Binary(br#"{"content":"","id":3}"#.to_vec()))
        .await;
    assert_eq!(client.recv_json().await, json!({"data": [], "id": 3}));

    client.send_message(Message::Binary(vec![0xff, 0xfe])).await;
    let response = client.recv_json().await;
    assert!(response["error"].is_string(), "Expected error: {}", response);
}

#[tokio::test]
async fn test_ping_gets_pong() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_message(Message::Ping(b"probe".to_vec())).await;
    loop {
        match client.recv_message().await {
            Message::Pong(data) => {
                assert_eq!(data, b"probe".to_vec());
                break;
            }
            other => panic!("Expected pong, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_connections_are_independent() {
    let stuck: Arc<dyn DetectionBackend> = Arc::new(StuckBackend);
    let fast: Arc<dyn DetectionBackend> = Arc::new(SleepyBackend {
        name: "fast",
        delay: Duration::ZERO,
    });
    let mut registry = BackendRegistry::new(fast);
    registry.register(stuck);

    let server = TestServer::with_registry(registry).await;
    let mut blocked = server.connect().await;
    let mut other = server.connect().await;

    blocked
        .send_json(&json!({"content": "x", "model": "stuck"}))
        .await;

    let response = other.request(&json!({"content": "x", "id": 1})).await;
    assert_eq!(response["data"][0]["languageId"], "fast");

    // The stuck request does not hold up later requests on its own connection
    let response = blocked.request(&json!({"content": "y", "id": 2})).await;
    assert_eq!(response["id"], 2);
}

#[tokio::test]
async fn test_client_close_leaves_server_running() {
    let server = TestServer::start().await;

    let client = server.connect().await;
    client.close().await;

    let mut client = server.connect().await;
    let response = client.request(&json!({"content": "", "id": 1})).await;
    assert_eq!(response, json!({"data": [], "id": 1}));
}
