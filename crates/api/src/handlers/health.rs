//! Health check endpoint. No auth; also keeps the cache warm.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
    pub sku_count: usize,
    pub uplift_count: usize,
    pub use_case_count: usize,
    pub last_refresh_utc: Option<DateTime<Utc>>,
}

/// GET /health — refresh the cache if stale and report its shape.
///
/// Fails (rather than reporting ok with empty counts) when the refresh
/// itself fails, so a misconfigured or cut-off instance is visibly
/// unhealthy.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    state.store.ensure_fresh().await?;
    let snapshot = state.store.snapshot().await;

    Ok(Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        sku_count: snapshot.skus.len(),
        uplift_count: snapshot.uplifts.len(),
        use_case_count: snapshot.use_cases.len(),
        last_refresh_utc: snapshot.last_refresh_utc,
    }))
}
