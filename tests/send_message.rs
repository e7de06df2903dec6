// tests/send_message.rs
// Drives the relay router over real HTTP with a stubbed provider.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use nomadia_relay::api::router::http_router;
use nomadia_relay::provider::{Intent, Provider, QueryResult};
use nomadia_relay::state::AppState;

struct StubAgent {
    result: QueryResult,
}

#[async_trait]
impl Provider for StubAgent {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn detect_intent(&self, _session_id: &str, _text: &str) -> Result<QueryResult> {
        Ok(self.result.clone())
    }
}

struct FailingAgent;

#[async_trait]
impl Provider for FailingAgent {
    fn name(&self) -> &'static str {
        "failing-stub"
    }

    async fn detect_intent(&self, _session_id: &str, _text: &str) -> Result<QueryResult> {
        anyhow::bail!("quota exceeded for project")
    }
}

/// Helper: serve the router on an ephemeral port, returning the base URL.
async fn start_test_server(provider: Arc<dyn Provider>) -> String {
    let app = http_router(Arc::new(AppState::new(provider)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", addr.port())
}

fn greeting_stub() -> StubAgent {
    StubAgent {
        result: QueryResult {
            fulfillment_text: "Salut!".to_string(),
            intent: Intent {
                name: "projects/x/agent/intents/1".to_string(),
                display_name: "greeting".to_string(),
            },
            parameters: json!({
                "fields": { "city": { "kind": "stringValue", "stringValue": "Paris" } }
            }),
            fulfillment_messages: vec![json!({
                "payload": {
                    "fields": { "cardType": { "kind": "stringValue", "stringValue": "info" } }
                }
            })],
        },
    }
}

#[tokio::test]
async fn send_message_returns_the_normalized_result() {
    let base = start_test_server(Arc::new(greeting_stub())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/send-message"))
        .json(&json!({ "text": "bonjour", "sessionId": "s1" }))
        .send()
        .await
        .expect("Failed to POST /send-message");

    assert!(resp.status().is_success());
    let reply: Value = resp.json().await.unwrap();

    assert_eq!(
        reply,
        json!({
            "queryResult": {
                "fulfillmentText": "Salut!",
                "intent": {
                    "displayName": "greeting",
                    "name": "projects/x/agent/intents/1"
                },
                "parameters": { "city": "Paris" },
                "fulfillmentMessages": [ { "payload": { "cardType": "info" } } ]
            },
            "sessionId": "s1"
        })
    );
}

#[tokio::test]
async fn missing_session_id_gets_a_fresh_one_per_request() {
    let base = start_test_server(Arc::new(greeting_stub())).await;
    let client = reqwest::Client::new();

    let mut seen = Vec::new();
    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/send-message"))
            .json(&json!({ "text": "bonjour" }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let reply: Value = resp.json().await.unwrap();
        let session = reply["sessionId"].as_str().unwrap().to_string();
        assert!(!session.is_empty(), "sessionId should never be empty");
        seen.push(session);
    }

    assert_ne!(seen[0], seen[1], "generated session ids should be distinct");
}

#[tokio::test]
async fn caller_session_id_is_passed_through() {
    let base = start_test_server(Arc::new(greeting_stub())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/send-message"))
        .json(&json!({ "text": "bonjour", "sessionId": "abc" }))
        .send()
        .await
        .unwrap();

    let reply: Value = resp.json().await.unwrap();
    assert_eq!(reply["sessionId"], "abc");
}

#[tokio::test]
async fn provider_failure_surfaces_as_500_with_the_error() {
    let base = start_test_server(Arc::new(FailingAgent)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/send-message"))
        .json(&json!({ "text": "bonjour", "sessionId": "s1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let reply: Value = resp.json().await.unwrap();
    assert_eq!(reply["error"], true);
    assert!(
        reply["message"].as_str().unwrap().contains("quota exceeded"),
        "error body should carry the provider error content, got {reply}"
    );
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let base = start_test_server(Arc::new(greeting_stub())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/send-message"))
        .body("{not:json")
        .header("Content-Type", "application/json")
        .send()
        .await
        .expect("POST should not crash");

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let base = start_test_server(Arc::new(greeting_stub())).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
