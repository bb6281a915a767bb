//! Integration tests for the authenticated reference-data endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Auth gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skus_without_key_returns_401() {
    let app = common::build_test_app();
    let response = get(app, "/skus").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn skus_with_wrong_key_returns_401() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/skus")
        .header("x-api-key", "not-the-key")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unconfigured_server_key_returns_500() {
    let mut config = common::test_config();
    config.api_key = None;
    let app = common::build_app_with(
        config,
        std::sync::Arc::new(common::StaticSource::standard()),
    );

    let response = get_auth(app, "/skus").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// GET /skus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skus_sorted_by_code_with_parsed_prices() {
    let app = common::build_test_app();
    let response = get_auth(app, "/skus").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let skus = json["data"].as_array().unwrap();

    assert_eq!(skus.len(), 2);
    assert_eq!(skus[0]["sku_code"], "SKU-A");
    assert_eq!(skus[0]["name"], "Alpha Inference");
    // "$2.00" in the sheet parses to a plain number.
    assert_eq!(skus[0]["base_unit_price"], 2.0);
    assert_eq!(skus[1]["sku_code"], "SKU-B");
    assert_eq!(skus[1]["unit"], 2.0);
}

// ---------------------------------------------------------------------------
// GET /uplifts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn uplifts_sorted_by_name_with_enabled_flags() {
    let app = common::build_test_app();
    let response = get_auth(app, "/uplifts").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let uplifts = json["data"].as_array().unwrap();

    assert_eq!(uplifts.len(), 2);
    assert_eq!(uplifts[0]["uplift_name"], "Default");
    assert_eq!(uplifts[0]["enabled"], true);
    assert_eq!(uplifts[1]["uplift_name"], "Weekend");
    assert_eq!(uplifts[1]["enabled"], false);
}

// ---------------------------------------------------------------------------
// GET /use-cases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn use_cases_in_sheet_column_order() {
    let app = common::build_test_app();
    let response = get_auth(app, "/use-cases").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(
        json["data"],
        serde_json::json!(["Early-Stage AI Startup", "Academic Research"])
    );
}
