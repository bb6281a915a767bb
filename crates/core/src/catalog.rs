//! Reference-data record types and the per-sheet parsers.
//!
//! Four sheets feed the service: the SKU price list, the volume discount
//! tiers, the percentage uplifts, and the use-case consumption mapping.
//! Each parser turns a [`Table`] into typed records, failing with a
//! [`CoreError::Schema`] when an expected column is missing and a
//! [`CoreError::Parse`] when a numeric cell is malformed. A refresh either
//! parses all four sheets or replaces nothing.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coerce::{parse_bool, parse_float};
use crate::error::CoreError;
use crate::table::Table;

/// Key column of the use-case mapping sheet; every other column header is a
/// use-case name.
pub const SKU_CODE_COLUMN: &str = "SKU Code";

/// One row of the price list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sku {
    pub sku_code: String,
    pub name: String,
    pub unit_label: String,
    pub base_unit_price: f64,
    /// Divisor converting a raw quantity into relative units. The sheet is
    /// expected to keep this nonzero; quote math divides by it.
    pub unit: f64,
}

/// One volume discount tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeDiscount {
    /// Minimum relative units for the tier to qualify.
    pub min_units: f64,
    /// Discount as a fraction in `[0, 1]` (not validated).
    pub discount_decimal: f64,
}

/// One named percentage surcharge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Uplift {
    pub uplift_name: String,
    pub percent_decimal: f64,
    pub enabled: bool,
}

/// Units-consumed-per-hour by use case, for one SKU.
pub type UseCaseRates = HashMap<String, f64>;

/// The complete set of cached reference data as of one successful refresh.
///
/// Built fully off to the side and swapped in as a unit, so readers never
/// observe a torn mix of old and new sheets. `Default` is the empty
/// pre-first-refresh state.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// SKUs keyed (and therefore iterated) by code.
    pub skus: BTreeMap<String, Sku>,
    /// Discount tiers sorted ascending by `min_units`.
    pub volume_discounts: Vec<VolumeDiscount>,
    /// Uplifts keyed (and therefore iterated) by name.
    pub uplifts: BTreeMap<String, Uplift>,
    /// Per-SKU consumption rates, keyed by SKU code.
    pub use_case_mappings: BTreeMap<String, UseCaseRates>,
    /// Use-case names in sheet column order.
    pub use_cases: Vec<String>,
    /// When the snapshot was built; `None` until the first refresh.
    pub last_refresh_utc: Option<DateTime<Utc>>,
}

/// Parse the price list sheet into SKUs keyed by code.
pub fn parse_skus(table: &Table) -> Result<BTreeMap<String, Sku>, CoreError> {
    let mut skus = BTreeMap::new();
    for row in table.rows() {
        let sku = Sku {
            sku_code: row.require(SKU_CODE_COLUMN)?.to_string(),
            name: row.require("Name")?.to_string(),
            unit_label: row.require("Unit Label")?.to_string(),
            base_unit_price: parse_float(row.require("Base Unit Price (USD)")?)?,
            unit: parse_float(row.require("Unit")?)?,
        };
        skus.insert(sku.sku_code.clone(), sku);
    }
    Ok(skus)
}

/// Parse the volume discount sheet, sorted ascending by threshold.
pub fn parse_volume_discounts(table: &Table) -> Result<Vec<VolumeDiscount>, CoreError> {
    let mut discounts = Vec::new();
    for row in table.rows() {
        discounts.push(VolumeDiscount {
            min_units: parse_float(row.require("Min Units (Relative)")?)?,
            discount_decimal: parse_float(row.require("Discount % (as decimal)")?)?,
        });
    }
    discounts.sort_by(|a, b| a.min_units.total_cmp(&b.min_units));
    Ok(discounts)
}

/// Parse the uplift sheet into uplifts keyed by name.
pub fn parse_uplifts(table: &Table) -> Result<BTreeMap<String, Uplift>, CoreError> {
    let mut uplifts = BTreeMap::new();
    for row in table.rows() {
        let uplift = Uplift {
            uplift_name: row.require("Uplift Name")?.to_string(),
            percent_decimal: parse_float(row.require("Percent (as decimal)")?)?,
            enabled: parse_bool(row.require("Enabled (TRUE/FALSE)")?),
        };
        uplifts.insert(uplift.uplift_name.clone(), uplift);
    }
    Ok(uplifts)
}

/// Parse the use-case mapping sheet.
///
/// The `SKU Code` column is the key; every other column header becomes a
/// use-case name, returned in original column order. Rows with an empty SKU
/// code are skipped; each retained SKU gets an entry (default `0.0`) for
/// every use case. A sheet with zero data rows yields an empty mapping and
/// an empty use-case list.
pub fn parse_use_case_mappings(
    table: &Table,
) -> Result<(BTreeMap<String, UseCaseRates>, Vec<String>), CoreError> {
    if table.is_empty() {
        return Ok((BTreeMap::new(), Vec::new()));
    }

    let use_cases: Vec<String> = table
        .headers()
        .iter()
        .filter(|h| *h != SKU_CODE_COLUMN)
        .cloned()
        .collect();

    let mut mappings = BTreeMap::new();
    for row in table.rows() {
        let sku_code = row.get(SKU_CODE_COLUMN).unwrap_or("");
        if sku_code.is_empty() {
            continue;
        }
        let mut rates = UseCaseRates::with_capacity(use_cases.len());
        for use_case in &use_cases {
            rates.insert(use_case.clone(), parse_float(row.get(use_case).unwrap_or(""))?);
        }
        mappings.insert(sku_code.to_string(), rates);
    }

    Ok((mappings, use_cases))
}
