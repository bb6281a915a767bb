//! Shared helpers for API integration tests.
//!
//! Builds the full application router over an in-memory sheet source, with
//! the same middleware stack as `main.rs`, so tests exercise CORS, request
//! IDs, timeouts, and panic recovery exactly as production does.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pricedesk_api::config::{ServerConfig, SheetUrls};
use pricedesk_api::fetch::{FetchError, TableSource};
use pricedesk_api::router;
use pricedesk_api::state::AppState;
use pricedesk_api::store::DataStore;
use pricedesk_core::table::Table;

pub const TEST_API_KEY: &str = "test-key";

pub const PRICELIST_CSV: &str = "\
SKU Code,Name,Unit Label,Base Unit Price (USD),Unit
SKU-A,Alpha Inference,Tokens,\"$2.00\",1
SKU-B,Batch Jobs,Jobs,1.0,2
";

pub const VOLUME_CSV: &str = "\
Min Units (Relative),Discount % (as decimal)
10,0.1
";

pub const UPLIFTS_CSV: &str = "\
Uplift Name,Percent (as decimal),Enabled (TRUE/FALSE)
Default,0.2,TRUE
Weekend,0.05,FALSE
";

pub const MAPPINGS_CSV: &str = "\
SKU Code,Early-Stage AI Startup,Academic Research
SKU-A,3,\"1,200.5\"
SKU-B,1,
";

/// In-memory sheet source keyed by URL.
pub struct StaticSource {
    sheets: HashMap<String, String>,
}

impl StaticSource {
    /// The standard four-sheet fixture used by most tests.
    pub fn standard() -> Self {
        let sheets = HashMap::from([
            ("http://sheets/pricelist".to_string(), PRICELIST_CSV.to_string()),
            ("http://sheets/volume".to_string(), VOLUME_CSV.to_string()),
            ("http://sheets/uplifts".to_string(), UPLIFTS_CSV.to_string()),
            ("http://sheets/mappings".to_string(), MAPPINGS_CSV.to_string()),
        ]);
        Self { sheets }
    }
}

#[async_trait]
impl TableSource for StaticSource {
    async fn fetch_table(&self, url: &str) -> Result<Table, FetchError> {
        match self.sheets.get(url) {
            Some(text) => Ok(Table::parse(text)),
            None => Err(FetchError::HttpStatus(404)),
        }
    }
}

/// The sheet URLs matching [`StaticSource::standard`].
pub fn test_sheet_urls() -> SheetUrls {
    SheetUrls {
        pricelist: Some("http://sheets/pricelist".to_string()),
        volume: Some("http://sheets/volume".to_string()),
        uplifts: Some("http://sheets/uplifts".to_string()),
        use_case_mappings: Some("http://sheets/mappings".to_string()),
    }
}

/// Build a test `ServerConfig` with safe defaults and the standard sheet
/// URLs.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_key: Some(TEST_API_KEY.to_string()),
        refresh_secs: 600,
        fetch_timeout_secs: 30,
        sheets: test_sheet_urls(),
    }
}

/// Build the full application router over the standard fixture.
pub fn build_test_app() -> Router {
    build_app_with(test_config(), Arc::new(StaticSource::standard()))
}

/// Build the full application router with the given config and source.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_app_with(config: ServerConfig, source: Arc<dyn TableSource>) -> Router {
    let store = Arc::new(DataStore::new(
        source,
        config.sheets.clone(),
        config.refresh_secs,
    ));

    let state = AppState {
        config: Arc::new(config),
        store,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    router::router()
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue an unauthenticated GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a GET request carrying the test API key.
pub async fn get_auth(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("x-api-key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue an authenticated POST with a JSON body.
pub async fn post_json_auth(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("x-api-key", TEST_API_KEY)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
