mod common;

use common::TestApp;
use portfolio_backend::services::{init_metrics, MockMailer, MockStore, CONTACT_COLLECTION};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Once;

// Initialize metrics once for all tests
static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

#[tokio::test]
async fn root_greeting_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Hello from the Rust backend!");
}

#[tokio::test]
async fn api_hello_greeting_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/api/hello", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Hello from the backend API!");
}

#[tokio::test]
async fn test_endpoint_reports_a_working_store() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/test", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["connection_status"], "Connected");

    let collections: Vec<&str> = body["collections"]
        .as_array()
        .expect("collections should be an array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(collections.contains(&CONTACT_COLLECTION));

    // Presence flags depend on the test process environment; they must be one
    // of the two report strings, never the variable's value.
    for key in ["database_url", "database_name"] {
        let flag = body[key].as_str().expect("flag should be a string");
        assert!(flag == "✅ Set" || flag == "❌ Not Set", "got {}", flag);
    }
}

#[tokio::test]
async fn test_endpoint_degrades_without_failing() {
    let app = TestApp::spawn_with(MockStore::failing(), MockMailer::new()).await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/test", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // A broken store must never fail the status endpoint itself.
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");

    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["connection_status"], "Connected");
    let database = body["database"].as_str().expect("database should be a string");
    assert!(
        database.starts_with("⚠️ Connected but Error:"),
        "got {}",
        database
    );
    assert!(database.contains("simulated store outage"));
    assert_eq!(body["collections"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "portfolio-backend");
}

#[tokio::test]
async fn health_check_reports_an_unreachable_store() {
    let app = TestApp::spawn_with(MockStore::failing(), MockMailer::new()).await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 503);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    ensure_metrics_initialized();
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");

    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    // An empty exposition is valid when nothing has recorded yet.
    assert!(
        body.is_empty() || body.contains('#') || body.contains('_'),
        "Unexpected metrics format: {}",
        body
    );
}

#[tokio::test]
async fn accepted_submissions_increment_the_exposed_counter() {
    ensure_metrics_initialized();
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/contact", app.address))
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Metrics",
            "message": "Counting on you."
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.expect("Failed to get response body");
    assert!(
        body.contains("contact_submissions_total"),
        "submission counter missing from exposition: {}",
        body
    );
    assert!(body.contains("email=\"sent\""), "got {}", body);
}
