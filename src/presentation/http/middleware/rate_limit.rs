// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type LoginRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

const REPLENISH_EVERY_SECONDS: u64 = 6;
const BURST: u32 = 10;

/// Per-client-IP limiter for login attempts: a burst of 10, then one attempt
/// every 6 seconds. `None` only if the quota constants are zero.
pub fn login_rate_limit_layer() -> Option<LoginRateLimitLayer> {
    let config = GovernorConfigBuilder::default()
        .per_second(REPLENISH_EVERY_SECONDS)
        .burst_size(BURST)
        .key_extractor(SmartIpKeyExtractor)
        .finish()?;

    Some(GovernorLayer::new(config))
}
