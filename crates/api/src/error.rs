use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pricedesk_core::error::CoreError;
use serde_json::json;

use crate::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for refresh
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pricedesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A cache refresh failure (configuration, fetch, or sheet data).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request failed the API key check.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::SkuNotFound { code } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Unknown sku_code: {code}"),
                ),
                CoreError::UnknownUseCase { name } => (
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_USE_CASE",
                    format!("use_case not found: {name}"),
                ),
                CoreError::UnknownUplifts { names } => (
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_UPLIFTS",
                    format!("Unknown uplifts: {names:?}"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Schema/Parse errors outside a refresh should not happen;
                // treat them like the refresh-time upstream failures below.
                CoreError::Schema { .. } | CoreError::Parse { .. } => {
                    upstream_error(&self)
                }
            },

            // --- Refresh failures ---
            AppError::Store(store) => match store {
                StoreError::Config(missing) => {
                    tracing::error!(missing = %missing, "Refresh blocked by missing configuration");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIG_ERROR",
                        format!("Missing required configuration: {missing}"),
                    )
                }
                StoreError::Fetch(_) | StoreError::Data(_) => upstream_error(&self),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a refresh-time upstream failure (sheet unreachable or malformed) to
/// 502 with a sanitized message; old cached data keeps serving until a
/// refresh succeeds, so the full detail goes to the log only.
fn upstream_error(err: &AppError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Reference data refresh failed");
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR",
        "Failed to refresh reference data".to_string(),
    )
}
