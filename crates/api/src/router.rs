//! Route table for the quote service.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application routes.
///
/// ```text
/// GET  /health      cache shape + freshness (public)
/// GET  /skus        price list, sorted by code (auth)
/// GET  /uplifts     uplifts, sorted by name (auth)
/// GET  /use-cases   use-case names in sheet order (auth)
/// POST /quote       sku or use_case quote (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/skus", get(handlers::catalog::list_skus))
        .route("/uplifts", get(handlers::catalog::list_uplifts))
        .route("/use-cases", get(handlers::catalog::list_use_cases))
        .route("/quote", post(handlers::quote::create_quote))
}
