//! The quote engine: single-SKU quotes and use-case aggregate quotes.
//!
//! All functions here are pure computation over a [`Snapshot`] reference;
//! they perform no I/O and never mutate the snapshot. Every intermediate
//! value is exposed in the result structs so clients can display a full
//! breakdown.

use serde::Serialize;

use crate::catalog::{Snapshot, Uplift, VolumeDiscount};
use crate::error::CoreError;

/// An uplift selected for a quote: name plus the fraction applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedUplift {
    pub uplift_name: String,
    pub percent_decimal: f64,
}

impl From<&Uplift> for AppliedUplift {
    fn from(uplift: &Uplift) -> Self {
        Self {
            uplift_name: uplift.uplift_name.clone(),
            percent_decimal: uplift.percent_decimal,
        }
    }
}

/// Identity of the quoted SKU, echoed in the breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct SkuRef {
    pub sku_code: String,
    pub name: String,
    pub unit_label: String,
}

/// Full breakdown of a single-SKU quote.
#[derive(Debug, Clone, Serialize)]
pub struct SkuQuote {
    pub sku: SkuRef,
    pub quantity_raw: f64,
    pub unit_multiplier: f64,
    pub relative_units: f64,
    pub base_unit_price: f64,
    pub base_cost: f64,
    pub discount_decimal: f64,
    pub discounted_cost: f64,
    pub uplift_decimal: f64,
    pub final_cost: f64,
    pub applied_uplifts: Vec<AppliedUplift>,
}

/// One line of a use-case quote, covering a single SKU.
#[derive(Debug, Clone, Serialize)]
pub struct UseCaseLine {
    pub sku_code: String,
    pub sku_name: String,
    pub unit_label: String,
    pub units_per_hour: f64,
    pub units_total: f64,
    pub cost_usd: f64,
}

/// Aggregate quote for a use case run over a number of hours.
#[derive(Debug, Clone, Serialize)]
pub struct UseCaseQuote {
    pub use_case: String,
    pub hours: f64,
    pub grand_total_usd: f64,
    /// Per-SKU lines, sorted by cost descending.
    pub breakdown: Vec<UseCaseLine>,
}

/// Resolve the uplifts to apply to a quote.
///
/// With `None`, returns every uplift currently flagged enabled. With
/// `Some(names)` (including the empty list) every name must exist or the
/// call fails with [`CoreError::UnknownUplifts`] listing all missing
/// entries; the named uplifts are returned in request order, duplicates
/// preserved (each occurrence is summed into the total), enabled flag
/// ignored.
pub fn resolve_uplifts(
    snapshot: &Snapshot,
    names: Option<&[String]>,
) -> Result<Vec<AppliedUplift>, CoreError> {
    let Some(names) = names else {
        return Ok(snapshot
            .uplifts
            .values()
            .filter(|u| u.enabled)
            .map(AppliedUplift::from)
            .collect());
    };

    let missing: Vec<String> = names
        .iter()
        .filter(|name| !snapshot.uplifts.contains_key(*name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::UnknownUplifts { names: missing });
    }

    Ok(names
        .iter()
        .filter_map(|name| snapshot.uplifts.get(name))
        .map(AppliedUplift::from)
        .collect())
}

/// Select the discount fraction for a given relative-unit volume.
///
/// Running maximum of `discount_decimal` over the threshold-ascending list,
/// restricted to tiers whose `min_units` qualifies. The comparison is a
/// strict greater-than, so with a non-monotonic table a later equal (or
/// lower) discount never replaces an earlier higher one. Zero if no tier
/// qualifies.
pub fn select_discount(discounts: &[VolumeDiscount], relative_units: f64) -> f64 {
    let mut best = 0.0;
    for tier in discounts {
        if tier.min_units <= relative_units && tier.discount_decimal > best {
            best = tier.discount_decimal;
        }
    }
    best
}

/// Compute a quote for `quantity` raw units of one SKU.
///
/// `relative_units = quantity / sku.unit`, then base cost, volume discount,
/// and uplift stacking in that order:
///
/// ```text
/// final = quantity / unit * price * (1 - discount) * (1 + sum(uplifts))
/// ```
pub fn sku_quote(
    snapshot: &Snapshot,
    sku_code: &str,
    quantity: f64,
    uplift_names: Option<&[String]>,
) -> Result<SkuQuote, CoreError> {
    let sku = snapshot
        .skus
        .get(sku_code)
        .ok_or_else(|| CoreError::SkuNotFound {
            code: sku_code.to_string(),
        })?;

    let relative_units = quantity / sku.unit;
    let base_cost = relative_units * sku.base_unit_price;

    let discount_decimal = select_discount(&snapshot.volume_discounts, relative_units);
    let discounted_cost = base_cost * (1.0 - discount_decimal);

    let applied_uplifts = resolve_uplifts(snapshot, uplift_names)?;
    let uplift_decimal: f64 = applied_uplifts.iter().map(|u| u.percent_decimal).sum();
    let final_cost = discounted_cost * (1.0 + uplift_decimal);

    Ok(SkuQuote {
        sku: SkuRef {
            sku_code: sku.sku_code.clone(),
            name: sku.name.clone(),
            unit_label: sku.unit_label.clone(),
        },
        quantity_raw: quantity,
        unit_multiplier: sku.unit,
        relative_units,
        base_unit_price: sku.base_unit_price,
        base_cost,
        discount_decimal,
        discounted_cost,
        uplift_decimal,
        final_cost,
        applied_uplifts,
    })
}

/// Compute an aggregate quote for a use case run over `hours`.
///
/// Fans out over every SKU in the mapping sheet: lines with zero projected
/// units are dropped, as are mapping rows whose SKU code no longer exists
/// in the price list (stale rows). Each retained line is costed through
/// [`sku_quote`] and the breakdown is sorted by line cost descending.
pub fn use_case_quote(
    snapshot: &Snapshot,
    use_case: &str,
    hours: f64,
    uplift_names: Option<&[String]>,
) -> Result<UseCaseQuote, CoreError> {
    if !snapshot.use_cases.iter().any(|name| name == use_case) {
        return Err(CoreError::UnknownUseCase {
            name: use_case.to_string(),
        });
    }
    if hours <= 0.0 {
        return Err(CoreError::Validation("hours must be > 0".to_string()));
    }

    let mut breakdown = Vec::new();
    let mut grand_total_usd = 0.0;

    for (sku_code, rates) in &snapshot.use_case_mappings {
        let units_per_hour = rates.get(use_case).copied().unwrap_or(0.0);
        let units_total = units_per_hour * hours;
        if units_total <= 0.0 {
            continue;
        }
        if !snapshot.skus.contains_key(sku_code) {
            continue;
        }

        let line = sku_quote(snapshot, sku_code, units_total, uplift_names)?;
        grand_total_usd += line.final_cost;
        breakdown.push(UseCaseLine {
            sku_code: sku_code.clone(),
            sku_name: line.sku.name,
            unit_label: line.sku.unit_label,
            units_per_hour,
            units_total,
            cost_usd: line.final_cost,
        });
    }

    breakdown.sort_by(|a, b| b.cost_usd.total_cmp(&a.cost_usd));

    Ok(UseCaseQuote {
        use_case: use_case.to_string(),
        hours,
        grand_total_usd,
        breakdown,
    })
}
