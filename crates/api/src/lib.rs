//! HTTP layer of the pricedesk quote service.
//!
//! Owns the axum router, configuration, the reference-data cache
//! ([`store::DataStore`]) and the sheet fetcher behind it, and the mapping
//! from domain errors to HTTP responses.

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod store;
