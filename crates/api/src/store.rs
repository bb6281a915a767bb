//! The reference-data cache.
//!
//! [`DataStore`] owns the current [`Snapshot`] and the refresh lifecycle.
//! A refresh fetches all four sheets concurrently, parses them, and swaps a
//! fully-built snapshot in one store, so quote computation never observes a
//! torn mix of old and new reference data. A failed refresh leaves the
//! previous snapshot fully intact.
//!
//! Refreshes are single-flight: while one is running, concurrent callers
//! wait on the guard and then reuse whatever snapshot state resulted rather
//! than issuing their own fetch batch. Only the caller that initiated the
//! in-flight refresh sees its error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use pricedesk_core::catalog::{self, Snapshot};
use pricedesk_core::error::CoreError;
use tokio::sync::{Mutex, RwLock};

use crate::config::SheetUrls;
use crate::fetch::{FetchError, TableSource};

/// Error type for cache refresh failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// One or more required sheet URLs are not configured.
    #[error("Missing required configuration: {0}")]
    Config(String),

    /// A sheet could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetched sheet could not be parsed into reference data.
    #[error(transparent)]
    Data(#[from] CoreError),
}

/// In-memory cache of the reference data, refreshed on demand.
pub struct DataStore {
    source: Arc<dyn TableSource>,
    sheets: SheetUrls,
    refresh_secs: u64,
    snapshot: RwLock<Arc<Snapshot>>,
    /// Serializes refreshes; waiters piggyback on the finished attempt.
    refresh_gate: Mutex<()>,
    /// Bumped after every refresh attempt, success or failure. A caller
    /// that observes a bump while waiting on the gate knows another
    /// refresh just ran on its behalf.
    refresh_attempts: AtomicU64,
}

impl DataStore {
    /// Create a store with an empty snapshot. No fetch happens until the
    /// first [`DataStore::ensure_fresh`] or [`DataStore::refresh_once`].
    pub fn new(source: Arc<dyn TableSource>, sheets: SheetUrls, refresh_secs: u64) -> Self {
        Self {
            source,
            sheets,
            refresh_secs,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            refresh_gate: Mutex::new(()),
            refresh_attempts: AtomicU64::new(0),
        }
    }

    /// The current snapshot. Cheap: clones the `Arc`, never the data.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Refresh the snapshot if it is stale or was never loaded.
    ///
    /// A failed refresh does not advance the timestamp, so the next call
    /// attempts again immediately (no backoff).
    pub async fn ensure_fresh(&self) -> Result<(), StoreError> {
        let stale = match self.snapshot.read().await.last_refresh_utc {
            None => true,
            Some(ts) => Utc::now() - ts >= TimeDelta::seconds(self.refresh_secs as i64),
        };
        if stale {
            self.refresh_once().await
        } else {
            Ok(())
        }
    }

    /// Run one refresh, or piggyback on a refresh that was already in
    /// flight when this call arrived.
    pub async fn refresh_once(&self) -> Result<(), StoreError> {
        let ticket = self.refresh_attempts.load(Ordering::Acquire);
        let _guard = self.refresh_gate.lock().await;
        if self.refresh_attempts.load(Ordering::Acquire) != ticket {
            // Another refresh attempt finished while we were waiting on the
            // gate; use its result as-is. If it failed, the snapshot is
            // simply the pre-attempt one and the error stays with the
            // caller that triggered the attempt.
            return Ok(());
        }

        let result = self.fetch_and_swap().await;
        self.refresh_attempts.fetch_add(1, Ordering::Release);
        result
    }

    /// Fetch all four sheets, parse them, and swap in the new snapshot.
    async fn fetch_and_swap(&self) -> Result<(), StoreError> {
        let (pricelist, volume, uplifts, mappings) = self.required_urls()?;

        let (price_table, volume_table, uplift_table, mapping_table) = tokio::try_join!(
            self.source.fetch_table(pricelist),
            self.source.fetch_table(volume),
            self.source.fetch_table(uplifts),
            self.source.fetch_table(mappings),
        )?;

        let skus = catalog::parse_skus(&price_table)?;
        let volume_discounts = catalog::parse_volume_discounts(&volume_table)?;
        let parsed_uplifts = catalog::parse_uplifts(&uplift_table)?;
        let (use_case_mappings, use_cases) = catalog::parse_use_case_mappings(&mapping_table)?;

        let next = Snapshot {
            skus,
            volume_discounts,
            uplifts: parsed_uplifts,
            use_case_mappings,
            use_cases,
            last_refresh_utc: Some(Utc::now()),
        };

        tracing::info!(
            sku_count = next.skus.len(),
            uplift_count = next.uplifts.len(),
            use_case_count = next.use_cases.len(),
            "Reference data refreshed"
        );

        *self.snapshot.write().await = Arc::new(next);
        Ok(())
    }

    /// All four sheet URLs, or a config error naming the missing ones.
    fn required_urls(&self) -> Result<(&str, &str, &str, &str), StoreError> {
        let sheets = &self.sheets;
        match (
            sheets.pricelist.as_deref(),
            sheets.volume.as_deref(),
            sheets.uplifts.as_deref(),
            sheets.use_case_mappings.as_deref(),
        ) {
            (Some(pricelist), Some(volume), Some(uplifts), Some(mappings)) => {
                Ok((pricelist, volume, uplifts, mappings))
            }
            _ => {
                let missing: Vec<&str> = [
                    ("PRICELIST_CSV_URL", sheets.pricelist.is_none()),
                    ("VOLUME_CSV_URL", sheets.volume.is_none()),
                    ("UPLIFTS_CSV_URL", sheets.uplifts.is_none()),
                    ("USE_CASE_MAPPINGS_CSV_URL", sheets.use_case_mappings.is_none()),
                ]
                .into_iter()
                .filter(|(_, is_missing)| *is_missing)
                .map(|(var, _)| var)
                .collect();
                Err(StoreError::Config(missing.join(", ")))
            }
        }
    }
}
