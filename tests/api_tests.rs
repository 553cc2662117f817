//! End-to-end tests for the HTTP API.
//!
//! Each test builds its own router around a fresh in-memory storage.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use snaplink::models::Url;
use snaplink::config::CorsConfig;
use snaplink::routes::{create_router, AppState};
use snaplink::storage::MemoryStorage;
use std::sync::Arc;
use uuid::Uuid;

fn server_with(storage: Arc<MemoryStorage>, public_base_url: Option<&str>) -> TestServer {
    let mut state = AppState::new(storage);
    state.public_base_url = public_base_url.map(str::to_string);
    let cors = CorsConfig {
        allowed_origins: vec!["*".to_string()],
    };
    let app = create_router(Arc::new(state), &cors, 64 * 1024);
    TestServer::new(app).unwrap()
}

fn server() -> TestServer {
    server_with(Arc::new(MemoryStorage::default()), None)
}

async fn shorten(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/shorturl").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_create_redirect_and_stats_flow() {
    let server = server();

    let created = shorten(&server, json!({ "originalUrl": "https://example.com/a" })).await;
    let code = created["code"].as_str().unwrap().to_string();
    assert!((5..=10).contains(&code.len()));
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(created["original_url"], "https://example.com/a");
    assert!(created["short_url"].as_str().unwrap().ends_with(&format!("/{}", code)));
    assert!(created["created_at"].is_string());

    let redirect = server.get(&format!("/{}", code)).await;
    assert_eq!(redirect.status_code(), StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://example.com/a");

    let stats = server
        .get(&format!("/api/shorturl/{}/stats", code))
        .await
        .json::<Value>();
    assert_eq!(stats["code"], code.as_str());
    assert_eq!(stats["originalUrl"], "https://example.com/a");
    assert_eq!(stats["totalClicks"], 1);
    assert_eq!(stats["recentClicks"].as_array().unwrap().len(), 1);
    assert!(stats["recentClicks"][0]["timestamp"].is_string());
    assert!(stats["expiresAt"].is_string());
}

#[tokio::test]
async fn test_custom_code_and_conflict() {
    let server = server();

    let created = shorten(
        &server,
        json!({ "originalUrl": "https://example.com", "code": "mylink", "expiresAt": "never" }),
    )
    .await;
    assert_eq!(created["code"], "mylink");

    let duplicate = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "https://example.org", "code": "mylink" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["error"], "CODE_EXISTS");
}

#[tokio::test]
async fn test_invalid_requests() {
    let server = server();

    let too_short = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "https://example.com", "code": "ab" }))
        .await;
    assert_eq!(too_short.status_code(), StatusCode::BAD_REQUEST);

    let bad_url = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "not-a-url" }))
        .await;
    assert_eq!(bad_url.status_code(), StatusCode::BAD_REQUEST);
    assert!(bad_url.json::<Value>()["message"].is_string());

    let bad_expiry = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "https://example.com", "expiresAt": "forever" }))
        .await;
    assert_eq!(bad_expiry.status_code(), StatusCode::BAD_REQUEST);

    let not_json = server.post("/api/shorturl").text("originalUrl=x").await;
    assert_eq!(not_json.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_destination_with_control_characters_is_rejected() {
    let server = server();

    for original_url in [
        "https://example.com/a\nb",
        "https://example.com/a\tb",
        " https://example.com",
    ] {
        let response = server
            .post("/api/shorturl")
            .json(&json!({ "originalUrl": original_url, "code": "nl123" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{:?}", original_url);
    }

    let missing = server.get("/api/shorturl/nl123/stats").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsendable_destination_is_not_counted() {
    let storage = Arc::new(MemoryStorage::default());
    storage
        .insert(Url {
            id: Uuid::new_v4(),
            code: "bad12".to_string(),
            original_url: "https://example.com/a\nb".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            expires_at: None,
        })
        .unwrap();
    let server = server_with(storage, None);

    let redirect = server.get("/bad12").await;
    assert_eq!(redirect.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let stats = server.get("/api/shorturl/bad12/stats").await.json::<Value>();
    assert_eq!(stats["totalClicks"], 0);
    assert!(stats["recentClicks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_code_shadowed_by_api_routes_is_rejected() {
    let server = server();

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "https://example.com", "code": "api12" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "INVALID_REQUEST");

    // Only the exact prefix is reserved
    let created = shorten(
        &server,
        json!({ "originalUrl": "https://example.com", "code": "apple" }),
    )
    .await;
    assert_eq!(created["code"], "apple");
    assert_eq!(server.get("/apple").await.status_code(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_list_urls_newest_first() {
    let server = server_with(Arc::new(MemoryStorage::default()), Some("https://sho.rt"));

    shorten(&server, json!({ "originalUrl": "https://example.com/1", "code": "first" })).await;
    shorten(&server, json!({ "originalUrl": "https://example.com/2", "code": "second" })).await;

    let list = server.get("/api/shorturl").await.json::<Value>();
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "second");
    assert_eq!(items[0]["shortUrl"], "https://sho.rt/second");
    assert_eq!(items[0]["originalUrl"], "https://example.com/2");
    assert_eq!(items[0]["clicks"], 0);
    assert!(items[0]["createdAt"].is_string());
    assert_eq!(items[1]["code"], "first");
}

#[tokio::test]
async fn test_delete_url() {
    let server = server();
    shorten(&server, json!({ "originalUrl": "https://example.com", "code": "gone1" })).await;
    server.get("/gone1").await;

    let deleted = server.delete("/api/shorturl/gone1").await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    let body = deleted.json::<Value>();
    assert_eq!(body["code"], "gone1");
    assert_eq!(body["message"], "URL deleted successfully");

    let stats = server.get("/api/shorturl/gone1/stats").await;
    assert_eq!(stats.status_code(), StatusCode::NOT_FOUND);

    let overview = server.get("/api/stats").await.json::<Value>();
    assert_eq!(overview["totalUrls"], 0);
    assert_eq!(overview["totalClicks"], 0);
}

#[tokio::test]
async fn test_delete_unknown_code_is_not_found() {
    let server = server();

    let response = server.delete("/api/shorturl/never1").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_global_stats() {
    let server = server();

    let empty = server.get("/api/stats").await.json::<Value>();
    assert_eq!(empty["totalUrls"], 0);
    assert_eq!(empty["avgClickRate"], "0.0");

    shorten(&server, json!({ "originalUrl": "https://example.com/a", "code": "aaaaa" })).await;
    shorten(&server, json!({ "originalUrl": "https://example.com/b", "code": "bbbbb" })).await;
    for _ in 0..3 {
        server.get("/aaaaa").await;
    }

    let stats = server.get("/api/stats").await.json::<Value>();
    assert_eq!(stats["totalUrls"], 2);
    assert_eq!(stats["totalClicks"], 3);
    assert_eq!(stats["activeUrls"], 2);
    assert_eq!(stats["avgClickRate"], "1.5");
}

#[tokio::test]
async fn test_expired_url_is_hidden_but_counted() {
    let storage = Arc::new(MemoryStorage::default());
    let now = Utc::now();
    storage
        .insert(Url {
            id: Uuid::new_v4(),
            code: "old12".to_string(),
            original_url: "https://example.com/old".to_string(),
            clicks: 0,
            created_at: now - Duration::days(2),
            expires_at: Some(now - Duration::days(1)),
        })
        .unwrap();
    let server = server_with(storage, None);

    let redirect = server.get("/old12").await;
    assert_ne!(redirect.status_code(), StatusCode::FOUND);

    let stats = server.get("/api/shorturl/old12/stats").await;
    assert_eq!(stats.status_code(), StatusCode::NOT_FOUND);

    assert!(server.get("/api/shorturl").await.json::<Value>().as_array().unwrap().is_empty());

    let overview = server.get("/api/stats").await.json::<Value>();
    assert_eq!(overview["totalUrls"], 1);
    assert_eq!(overview["activeUrls"], 0);
    assert_eq!(overview["totalClicks"], 0);

    // The expired row still owns its code
    let reuse = server
        .post("/api/shorturl")
        .json(&json!({ "originalUrl": "https://example.com/new", "code": "old12" }))
        .await;
    assert_eq!(reuse.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_recent_clicks_are_capped() {
    let server = server();
    shorten(&server, json!({ "originalUrl": "https://example.com", "code": "hot12" })).await;

    for _ in 0..12 {
        assert_eq!(server.get("/hot12").await.status_code(), StatusCode::FOUND);
    }

    let stats = server.get("/api/shorturl/hot12/stats").await.json::<Value>();
    assert_eq!(stats["totalClicks"], 12);
    assert_eq!(stats["recentClicks"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let server = server();

    let health = server.get("/api/health").await.json::<Value>();
    assert_eq!(health["status"], "healthy");

    let doc = server.get("/api/openapi.json").await.json::<Value>();
    assert!(doc["paths"]["/api/shorturl"].is_object());
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = server();

    let response = server.get("/api/stats").await;
    assert!(!response.header("x-request-id").is_empty());
}
