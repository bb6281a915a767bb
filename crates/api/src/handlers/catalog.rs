//! Read-only reference data endpoints (auth required).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pricedesk_core::catalog::{Sku, Uplift};

use crate::error::AppResult;
use crate::middleware::auth::ApiKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /skus — the current price list, sorted by SKU code.
pub async fn list_skus(
    State(state): State<AppState>,
    _auth: ApiKey,
) -> AppResult<impl IntoResponse> {
    state.store.ensure_fresh().await?;
    let snapshot = state.store.snapshot().await;

    // The snapshot keys SKUs in a BTreeMap, so iteration is already
    // code-ordered.
    let skus: Vec<Sku> = snapshot.skus.values().cloned().collect();
    Ok(Json(DataResponse { data: skus }))
}

/// GET /uplifts — the current uplifts, sorted by name.
pub async fn list_uplifts(
    State(state): State<AppState>,
    _auth: ApiKey,
) -> AppResult<impl IntoResponse> {
    state.store.ensure_fresh().await?;
    let snapshot = state.store.snapshot().await;

    let uplifts: Vec<Uplift> = snapshot.uplifts.values().cloned().collect();
    Ok(Json(DataResponse { data: uplifts }))
}

/// GET /use-cases — use-case names in sheet column order.
pub async fn list_use_cases(
    State(state): State<AppState>,
    _auth: ApiKey,
) -> AppResult<impl IntoResponse> {
    state.store.ensure_fresh().await?;
    let snapshot = state.store.snapshot().await;

    Ok(Json(DataResponse {
        data: snapshot.use_cases.clone(),
    }))
}
