//! Sheet fetching over HTTP.
//!
//! [`TableSource`] is the seam between the cache and the network: the store
//! only asks for "the table at this URL", which keeps refresh logic testable
//! with an in-memory source. [`HttpSource`] is the production implementation
//! backed by a reqwest client with a per-request timeout.

use std::time::Duration;

use async_trait::async_trait;
use pricedesk_core::table::Table;

/// Error type for sheet fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Sheet fetch returned HTTP {0}")]
    HttpStatus(u16),
}

/// Something that can produce a parsed table for a sheet location.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_table(&self, url: &str) -> Result<Table, FetchError>;
}

/// Fetches published sheet CSV exports over HTTP.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source with a pre-configured HTTP client.
    ///
    /// The timeout covers the whole request including the body read; sheet
    /// hosts redirect published exports, which reqwest follows by default.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }
}

#[async_trait]
impl TableSource for HttpSource {
    async fn fetch_table(&self, url: &str) -> Result<Table, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }
        let text = response.text().await?;
        Ok(Table::parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _source = HttpSource::new(Duration::from_secs(30));
    }
}
