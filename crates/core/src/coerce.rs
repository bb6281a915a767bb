//! Coercion of spreadsheet-formatted text into numbers and booleans.
//!
//! Sheet exports carry human formatting: thousands separators, currency
//! markers, percent signs, and TRUE/FALSE-style flags. These helpers strip
//! the decoration before parsing so the rest of the crate only sees plain
//! values.

use crate::error::CoreError;

/// Parse a spreadsheet-formatted numeric cell.
///
/// Strips `,`, `$`, and `%` anywhere in the value (e.g. `"1,000,000"`,
/// `"$12.50"`, `"5%"`). An empty cell (after stripping) is `0.0`. Anything
/// left over that is not a valid decimal number is a [`CoreError::Parse`].
pub fn parse_float(value: &str) -> Result<f64, CoreError> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%'))
        .collect();

    if cleaned.is_empty() {
        return Ok(0.0);
    }

    cleaned.parse::<f64>().map_err(|_| CoreError::Parse {
        value: value.trim().to_string(),
    })
}

/// Parse a spreadsheet boolean cell.
///
/// True for a case-insensitive match on `true`, `1`, `yes`, or `y`;
/// everything else (including empty) is false. Never fails.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}
