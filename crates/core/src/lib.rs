//! Pure pricing logic for the pricedesk quote service.
//!
//! This crate has zero I/O dependencies. It owns the reference-data record
//! types, the spreadsheet-text coercion helpers, the CSV table parser, and
//! the quote engine. The API crate feeds it tables fetched over HTTP and
//! reads back quote breakdowns.

pub mod catalog;
pub mod coerce;
pub mod error;
pub mod quote;
pub mod table;
