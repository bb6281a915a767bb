/// Server configuration loaded from environment variables.
///
/// Bind/CORS/timeout fields have defaults suitable for local development.
/// The sheet URLs and API key are deliberately *not* required at startup:
/// a missing sheet URL surfaces as a configuration error from the first
/// refresh, and a missing API key as a 500 from the auth gate, so the
/// health endpoint stays reachable on a misconfigured instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret expected in the `x-api-key` header (`PRICING_API_KEY`).
    pub api_key: Option<String>,
    /// Seconds after which the cached reference data is considered stale
    /// (default: `600`).
    pub refresh_secs: u64,
    /// Per-sheet fetch timeout in seconds (default: `30`).
    pub fetch_timeout_secs: u64,
    /// Locations of the four reference-data sheets.
    pub sheets: SheetUrls,
}

/// Fetch locations for the four reference-data sheets.
#[derive(Debug, Clone, Default)]
pub struct SheetUrls {
    /// SKU price list (`PRICELIST_CSV_URL`).
    pub pricelist: Option<String>,
    /// Volume discount tiers (`VOLUME_CSV_URL`).
    pub volume: Option<String>,
    /// Percentage uplifts (`UPLIFTS_CSV_URL`).
    pub uplifts: Option<String>,
    /// Use-case consumption mapping (`USE_CASE_MAPPINGS_CSV_URL`).
    pub use_case_mappings: Option<String>,
}

impl SheetUrls {
    /// Load the sheet URLs from environment variables.
    pub fn from_env() -> Self {
        Self {
            pricelist: optional_env("PRICELIST_CSV_URL"),
            volume: optional_env("VOLUME_CSV_URL"),
            uplifts: optional_env("UPLIFTS_CSV_URL"),
            use_case_mappings: optional_env("USE_CASE_MAPPINGS_CSV_URL"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `PRICING_API_KEY`           | *(unset)*               |
    /// | `REFRESH_SECONDS`           | `600`                   |
    /// | `FETCH_TIMEOUT_SECS`        | `30`                    |
    /// | `PRICELIST_CSV_URL`         | *(unset)*               |
    /// | `VOLUME_CSV_URL`            | *(unset)*               |
    /// | `UPLIFTS_CSV_URL`           | *(unset)*               |
    /// | `USE_CASE_MAPPINGS_CSV_URL` | *(unset)*               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let refresh_secs: u64 = std::env::var("REFRESH_SECONDS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("REFRESH_SECONDS must be a valid u64");

        let fetch_timeout_secs: u64 = std::env::var("FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("FETCH_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_key: optional_env("PRICING_API_KEY"),
            refresh_secs,
            fetch_timeout_secs,
            sheets: SheetUrls::from_env(),
        }
    }
}

/// Read an env var, treating unset and blank the same way.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
