//! The quote endpoint (auth required).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pricedesk_core::quote;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ApiKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /quote`. `mode` selects which of the optional field
/// groups is required; unknown extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default = "default_mode")]
    pub mode: String,
    pub sku_code: Option<String>,
    pub quantity: Option<f64>,
    pub use_case: Option<String>,
    pub hours: Option<f64>,
    /// `None` means "apply the default-enabled uplifts"; an explicit empty
    /// list means "apply none".
    pub uplift_names: Option<Vec<String>>,
}

fn default_mode() -> String {
    "sku".to_string()
}

/// POST /quote — compute a single-SKU or use-case quote.
pub async fn create_quote(
    State(state): State<AppState>,
    _auth: ApiKey,
    Json(body): Json<QuoteRequest>,
) -> AppResult<Response> {
    state.store.ensure_fresh().await?;
    let snapshot = state.store.snapshot().await;
    let uplift_names = body.uplift_names.as_deref();

    match body.mode.as_str() {
        "sku" => {
            let sku_code = body
                .sku_code
                .as_deref()
                .filter(|code| !code.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest("sku_code is required for mode=sku".into())
                })?;
            let quantity = body.quantity.filter(|q| *q > 0.0).ok_or_else(|| {
                AppError::BadRequest("quantity must be > 0 for mode=sku".into())
            })?;

            let result = quote::sku_quote(&snapshot, sku_code, quantity, uplift_names)?;
            Ok(Json(DataResponse { data: result }).into_response())
        }
        "use_case" => {
            let use_case = body
                .use_case
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest("use_case is required for mode=use_case".into())
                })?;
            let hours = body.hours.filter(|h| *h > 0.0).ok_or_else(|| {
                AppError::BadRequest("hours must be > 0 for mode=use_case".into())
            })?;

            let result = quote::use_case_quote(&snapshot, use_case, hours, uplift_names)?;
            Ok(Json(DataResponse { data: result }).into_response())
        }
        other => Err(AppError::BadRequest(format!(
            "mode must be either 'sku' or 'use_case', got '{other}'"
        ))),
    }
}
