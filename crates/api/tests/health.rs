//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

// ---------------------------------------------------------------------------
// Test: GET /health refreshes the cache and reports its shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_counts() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert!(json["version"].is_string());
    assert_eq!(json["sku_count"], 2);
    assert_eq!(json["uplift_count"], 2);
    assert_eq!(json["use_case_count"], 2);
    assert!(json["last_refresh_utc"].is_string());
}

// ---------------------------------------------------------------------------
// Test: GET /health requires no API key
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_is_public() {
    let app = common::build_test_app();
    // No x-api-key header at all.
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: health fails visibly when sheet URLs are missing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_missing_configuration() {
    let mut config = common::test_config();
    config.sheets = pricedesk_api::config::SheetUrls::default();
    let app = common::build_app_with(
        config,
        std::sync::Arc::new(common::StaticSource::standard()),
    );

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFIG_ERROR");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36);
}
