//! Rate limiting middleware for the login endpoint.

use actix_governor::governor::clock::QuantaInstant;
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};

pub type LoginRateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Create rate limiter configuration for the login endpoint.
///
/// Allows a burst of 5 attempts with 1 attempt replenished every 6 seconds.
/// Returns `None` when the quota is rejected by the builder.
///
/// Usage:
/// ```ignore
/// let config = create_login_rate_limiter_config()?;
/// web::resource("/user/login").wrap(Governor::new(&config))
/// ```
pub fn create_login_rate_limiter_config() -> Option<LoginRateLimiterConfig> {
    GovernorConfigBuilder::default()
        .seconds_per_request(6)
        .burst_size(5)
        .finish()
}
