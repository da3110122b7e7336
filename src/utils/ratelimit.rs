use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use actix_governor::{GovernorConfig, GovernorConfigBuilder, KeyExtractor};
use actix_web::dev::ServiceRequest;
use governor::middleware::NoOpMiddleware;

use crate::types::error::AppError;

/// Both quotas refill over the same window.
pub const RATE_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const API_REQUESTS_PER_WINDOW: u32 = 100;
pub const AUTH_ATTEMPTS_PER_WINDOW: u32 = 5;

/// Buckets requests by socket peer. Forwarding headers are not trusted.
#[derive(Clone, Copy, Debug)]
pub struct ClientIp;

impl KeyExtractor for ClientIp {
    type Key = IpAddr;
    type KeyExtractionError = AppError;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        // in-process calls carry no peer and share one bucket
        Ok(req
            .peer_addr()
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)))
    }
}

pub type LimiterConfig = GovernorConfig<ClientIp, NoOpMiddleware>;

/// Limiter state. Build once and clone into every worker so the buckets are shared.
#[derive(Clone)]
pub struct RateLimits {
    pub api: LimiterConfig,
    pub auth: LimiterConfig,
}

impl RateLimits {
    pub fn new() -> Result<Self, AppError> {
        Ok(RateLimits {
            api: limiter(API_REQUESTS_PER_WINDOW)?,
            auth: limiter(AUTH_ATTEMPTS_PER_WINDOW)?,
        })
    }
}

fn limiter(per_window: u32) -> Result<LimiterConfig, AppError> {
    let replenish = RATE_WINDOW.as_secs() / u64::from(per_window.max(1));

    GovernorConfigBuilder::default()
        .key_extractor(ClientIp)
        .seconds_per_request(replenish.max(1))
        .burst_size(per_window)
        .finish()
        .ok_or_else(|| AppError::Internal(format!("invalid rate limit of {per_window} per window")))
}
