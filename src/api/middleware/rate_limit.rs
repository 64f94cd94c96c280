//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Requires the
/// server to be started with connect info.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = app_router(state).layer(rate_limit::layer(2, 100)?);
/// ```
pub fn layer(
    per_second: u64,
    burst: u32,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For` / `X-Real-IP` / `Forwarded`.
///
/// Enable only behind a trusted reverse proxy: clients can forge these headers.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst` is zero.
pub fn proxied_layer(
    per_second: u64,
    burst: u32,
) -> Result<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limits_are_rejected() {
        assert!(layer(0, 10).is_err());
        assert!(layer(2, 0).is_err());
        assert!(layer(2, 100).is_ok());
        assert!(proxied_layer(2, 100).is_ok());
    }
}
