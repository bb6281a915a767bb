/// Domain-level error type shared by the parsing and quote modules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A sheet row is missing a column the parser expected.
    #[error("Missing expected column: {column}")]
    Schema { column: String },

    /// A cell that should hold a number could not be parsed as one.
    #[error("Invalid numeric value: '{value}'")]
    Parse { value: String },

    /// The requested SKU code is not in the current price list.
    #[error("Unknown sku_code: {code}")]
    SkuNotFound { code: String },

    /// The requested use case is not in the current mapping sheet.
    #[error("Unknown use_case: {name}")]
    UnknownUseCase { name: String },

    /// One or more requested uplift names do not exist. Carries every
    /// unrecognized name, not just the first.
    #[error("Unknown uplifts: {names:?}")]
    UnknownUplifts { names: Vec<String> },

    /// A caller-supplied value failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}
