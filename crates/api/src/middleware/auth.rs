//! Shared-secret API key extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured API key.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(_auth: ApiKey) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// The key arrives in the `x-api-key` header and is compared against
/// `PRICING_API_KEY` as SHA-256 digests, so the comparison does not leak
/// match length through timing.
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::InternalError("Server API key is not configured".into()))?;

        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing x-api-key header".into()))?;

        if sha256_hex(provided.as_bytes()) != sha256_hex(expected.as_bytes()) {
            return Err(AppError::Unauthorized("Invalid API key".into()));
        }

        Ok(ApiKey)
    }
}

/// Compute a SHA-256 hex digest of the given bytes.
fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_hex() {
        let a = sha256_hex(b"secret");
        assert_eq!(a, sha256_hex(b"secret"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, sha256_hex(b"Secret"));
    }
}
