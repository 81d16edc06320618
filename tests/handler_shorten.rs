mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use url_shortener::api::handlers::{shorten_handler, stats_handler};
use url_shortener::infrastructure::audit::AuditLevel;
use url_shortener::infrastructure::registry::InMemoryRegistry;
use url_shortener::state::AppState;

fn create_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn code_from_short_link(short_link: &str) -> String {
    short_link.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn test_shorten_generates_code() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    let short_link = json["shortLink"].as_str().unwrap();
    assert!(short_link.starts_with("http://s.example.com/"));

    let code = code_from_short_link(short_link);
    assert_eq!(code.len(), 7);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(json["expiry"].is_string());
}

#[tokio::test]
async fn test_shorten_uses_forwarded_proto() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .add_header("Host", "s.example.com:8443")
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({ "url": "https://example.com", "shortcode": "proto1" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["shortLink"],
        "https://s.example.com:8443/proto1"
    );
}

#[tokio::test]
async fn test_shorten_prefers_configured_base_url() {
    let (mut state, _rx) = common::create_test_state();
    state.base_url = Some("https://sho.rt".to_string());
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .add_header("Host", "internal:3000")
        .json(&json!({ "url": "https://example.com", "shortcode": "based1" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["shortLink"], "https://sho.rt/based1");
}

#[tokio::test]
async fn test_shorten_with_custom_code_starts_with_zero_clicks() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com", "shortcode": "mycode123" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["shortLink"],
        "http://s.example.com/mycode123"
    );

    let stats = server.get("/shorturls/mycode123").await;
    stats.assert_status_ok();

    let json = stats.json::<Value>();
    assert_eq!(json["totalClicks"], 0);
    assert_eq!(json["longUrl"], "https://example.com");
    assert_eq!(json["clicks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_shorten_expiry_matches_validity() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": 90, "shortcode": "valid90" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let stats = server.get("/shorturls/valid90").await.json::<Value>();
    let created: DateTime<Utc> = stats["createdAt"].as_str().unwrap().parse().unwrap();
    let expires: DateTime<Utc> = stats["expiresAt"].as_str().unwrap().parse().unwrap();

    assert_eq!((expires - created).num_minutes(), 90);
}

#[tokio::test]
async fn test_shorten_default_validity_is_thirty_minutes() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "default30" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let stats = server.get("/shorturls/default30").await.json::<Value>();
    let created: DateTime<Utc> = stats["createdAt"].as_str().unwrap().parse().unwrap();
    let expires: DateTime<Utc> = stats["expiresAt"].as_str().unwrap().parse().unwrap();

    assert_eq!((expires - created).num_minutes(), 30);
}

#[tokio::test]
async fn test_shorten_duplicate_code_conflicts() {
    let registry = Arc::new(InMemoryRegistry::new());
    common::create_test_link(&registry, "taken1", "https://first.com").await;
    let (state, _rx) = common::create_test_state_with_registry(registry);
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://second.com", "shortcode": "taken1" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");

    let stats = server.get("/shorturls/taken1").await.json::<Value>();
    assert_eq!(stats["longUrl"], "https://first.com");
}

#[tokio::test]
async fn test_shorten_expired_code_still_conflicts() {
    let registry = Arc::new(InMemoryRegistry::new());
    common::create_expired_link(&registry, "oldcode", "https://first.com").await;
    let (state, _rx) = common::create_test_state_with_registry(registry);
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://second.com", "shortcode": "oldcode" }))
        .await
        .assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_shorten_rejects_invalid_url() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    for url in ["not-a-url", "ftp://example.com/file", "https://", ""] {
        let response = server.post("/shorturls").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"]["code"],
            "validation_error",
            "url {url:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_shorten_rejects_missing_url() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "validity": 10 }))
        .await
        .assert_status_bad_request();

    server
        .post("/shorturls")
        .json(&json!({ "url": null }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_rejects_invalid_validity() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    for validity in [json!(0), json!(-5), json!(1.5), json!("30")] {
        server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "validity": validity }))
            .await
            .assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_rejects_invalid_shortcode() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let too_long = "a".repeat(33);
    for code in ["ab", "has-dash", "with space", "ünïcode", too_long.as_str()] {
        server
            .post("/shorturls")
            .json(&json!({ "url": "https://example.com", "shortcode": code }))
            .await
            .assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_rejects_malformed_body() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server.post("/shorturls").text("{ not json").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_reports_to_audit_log() {
    let (state, mut rx) = common::create_test_state();
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "audited" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": "audited" }))
        .await
        .assert_status(axum::http::StatusCode::CONFLICT);

    let entries = common::drain_audit(&mut rx);

    assert!(entries.iter().all(|e| e.stack == "backend"));
    assert!(
        entries
            .iter()
            .any(|e| e.level == AuditLevel::Info && e.message.contains("created shortcode audited"))
    );
    assert!(
        entries
            .iter()
            .any(|e| e.level == AuditLevel::Error && e.component == "repository")
    );
}

#[tokio::test]
async fn test_shorten_rejects_null_validity() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": null }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "'validity' must be a positive integer (minutes)"
    );
}

#[tokio::test]
async fn test_shorten_rejects_null_shortcode() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    let response = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "shortcode": null }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid 'shortcode'. 3-32 alphanumeric characters."
    );
}

#[tokio::test]
async fn test_shorten_accepts_whole_float_validity() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": 1.0, "shortcode": "float1" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let stats = server.get("/shorturls/float1").await.json::<Value>();
    let created: DateTime<Utc> = stats["createdAt"].as_str().unwrap().parse().unwrap();
    let expires: DateTime<Utc> = stats["expiresAt"].as_str().unwrap().parse().unwrap();

    assert_eq!((expires - created).num_minutes(), 1);
}

#[tokio::test]
async fn test_shorten_accepts_international_url() {
    let (state, _rx) = common::create_test_state();
    let server = create_server(state);

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://bücher.de/ü", "shortcode": "idn1" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let stats = server.get("/shorturls/idn1").await.json::<Value>();
    assert_eq!(stats["longUrl"], "https://bücher.de/ü");
}
