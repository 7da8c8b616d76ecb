//! Integration tests for onair-bs API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Banner catalog CRUD and pilot designation
//! - Slot registry derivation over columnist toggles
//! - Schedule queue add/list/delete and on-demand cleanup
//! - Render-time selection (scheduled entry, pilot fallback, empty slot)

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use onair_bs::{build_router, AppState};
use onair_common::events::EventBus;

/// Test helper: in-memory database with full schema
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Should open in-memory database");
    onair_bs::db::init_tables(&pool)
        .await
        .expect("Should create tables");
    pool
}

/// Test helper: create app with test state
fn setup_app(db: SqlitePool) -> axum::Router {
    let state = AppState::new(db, EventBus::new(16));
    build_router(state)
}

/// Test helper: request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request with JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: create a banner, returning its GUID
async fn create_banner(app: &axum::Router, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/banners",
            json!({
                "name": name,
                "image_url": format!("https://cdn.example.com/{}.png", name),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    body["guid"].as_str().unwrap().to_string()
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "onair-bs");
    assert!(body["version"].is_string());
}

// =============================================================================
// Banner Catalog Tests
// =============================================================================

#[tokio::test]
async fn test_create_and_list_banners() {
    let app = setup_app(setup_test_db().await);

    let guid = create_banner(&app, "spring").await;

    let response = app
        .oneshot(test_request("GET", "/api/banners"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["guid"], guid.as_str());
    assert_eq!(list[0]["active"], true);
    assert_eq!(list[0]["is_pilot"], false);
}

#[tokio::test]
async fn test_create_banner_rejects_empty_name() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/banners",
            json!({ "name": "", "image_url": "https://cdn.example.com/x.png" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_patch_unknown_banner_is_404() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/api/banners/no-such-guid",
            json!({ "active": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pilot_promotion_demotes_previous() {
    let app = setup_app(setup_test_db().await);
    let x = create_banner(&app, "x").await;
    let y = create_banner(&app, "y").await;

    for guid in [&y, &x] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/banners/{}/pilot", guid),
                json!({ "pilot": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(test_request("GET", "/api/banners"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let pilots: Vec<&Value> = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|b| b["is_pilot"] == true)
        .collect();

    assert_eq!(pilots.len(), 1);
    assert_eq!(pilots[0]["guid"], x.as_str());
}

// =============================================================================
// Slot Registry Tests
// =============================================================================

#[tokio::test]
async fn test_slots_include_active_columnists_only() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/columnists",
            json!({ "name": "Ana" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let ana = extract_json(response.into_body()).await;
    let ana_guid = ana["guid"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/slots"))
        .await
        .unwrap();
    let slots = extract_json(response.into_body()).await;
    let keys: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"hero"));
    assert!(keys.contains(&format!("columnist-{}", ana_guid).as_str()));

    // Deactivate: the very next derivation drops the slot
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/columnists/{}/active", ana_guid),
            json!({ "is_active": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(test_request("GET", "/api/slots"))
        .await
        .unwrap();
    let slots = extract_json(response.into_body()).await;
    let keys: Vec<String> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap().to_string())
        .collect();
    assert!(!keys.contains(&format!("columnist-{}", ana_guid)));
}

// =============================================================================
// Schedule Queue Tests
// =============================================================================

#[tokio::test]
async fn test_schedule_add_list_delete() {
    let app = setup_app(setup_test_db().await);
    let banner = create_banner(&app, "creative").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({ "slot_key": "hero", "banner_guid": banner, "priority": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = extract_json(response.into_body()).await;
    let entry_guid = entry["guid"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/schedule?slot=hero"))
        .await
        .unwrap();
    let list = extract_json(response.into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(test_request(
            "DELETE",
            &format!("/api/schedule/{}", entry_guid),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(test_request("GET", "/api/schedule"))
        .await
        .unwrap();
    let list = extract_json(response.into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_schedule_rejects_unknown_banner() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({ "slot_key": "hero", "banner_guid": "ghost" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cleanup_endpoint_reports_removed_count() {
    let app = setup_app(setup_test_db().await);
    let banner = create_banner(&app, "old").await;

    // Fully elapsed window
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({
                "slot_key": "hero",
                "banner_guid": banner,
                "starts_at": "2020-01-01T00:00:00Z",
                "ends_at": "2020-02-01T00:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/schedule/cleanup"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["removed"], 1);

    // Idempotent: second run removes nothing
    let response = app
        .oneshot(test_request("POST", "/api/schedule/cleanup"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["removed"], 0);
}

// =============================================================================
// Selection Tests
// =============================================================================

#[tokio::test]
async fn test_select_empty_slot_returns_null() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(test_request("GET", "/api/select/hero"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_select_returns_scheduled_banner() {
    let app = setup_app(setup_test_db().await);
    let low = create_banner(&app, "low").await;
    let high = create_banner(&app, "high").await;

    for (banner, priority) in [(&low, 1), (&high, 10)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/schedule",
                json!({ "slot_key": "hero", "banner_guid": banner, "priority": priority }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(test_request("GET", "/api/select/hero"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["guid"], high.as_str());
}

#[tokio::test]
async fn test_select_falls_back_to_pilot() {
    let app = setup_app(setup_test_db().await);
    let pilot = create_banner(&app, "pilot").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/banners/{}/pilot", pilot),
            json!({ "pilot": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // No schedule entries anywhere: every slot falls back to the pilot
    let response = app
        .oneshot(test_request("GET", "/api/select/sidebar"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["guid"], pilot.as_str());
}

#[tokio::test]
async fn test_select_ignores_expired_entry() {
    let app = setup_app(setup_test_db().await);
    let evergreen = create_banner(&app, "evergreen").await;
    let seasonal = create_banner(&app, "seasonal").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({ "slot_key": "hero", "banner_guid": evergreen, "priority": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Higher priority but long expired
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({
                "slot_key": "hero",
                "banner_guid": seasonal,
                "priority": 2,
                "starts_at": "2020-01-01T00:00:00Z",
                "ends_at": "2020-02-01T00:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(test_request("GET", "/api/select/hero"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["guid"], evergreen.as_str());
}

#[tokio::test]
async fn test_select_skips_inactive_banner() {
    let app = setup_app(setup_test_db().await);
    let banner = create_banner(&app, "retired").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedule",
            json!({ "slot_key": "footer", "banner_guid": banner }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Retire the creative after it was scheduled
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/banners/{}", banner),
            json!({ "active": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/api/select/footer"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.is_null());
}
