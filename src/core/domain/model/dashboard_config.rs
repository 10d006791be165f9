use crate::core::domain::value_object::PageSize;
use std::time::Duration;

/// Fixed refresh cadence of the node and stats endpoints.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Cadence of relative-time and countdown label refreshes.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Limits outgoing requests to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Runtime settings of a dashboard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub poll_interval: Duration,
    pub tick_interval: Duration,
    /// Initial page length of the node table.
    pub page_size: PageSize,
    /// Optional throttle on backend requests; `None` disables it.
    pub rate_limit: Option<RateLimitConfig>,
    /// Accept self-signed certificates on the backend.
    pub accept_invalid_certs: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            tick_interval: DEFAULT_TICK_INTERVAL,
            page_size: PageSize::default(),
            rate_limit: None,
            accept_invalid_certs: false,
        }
    }
}
