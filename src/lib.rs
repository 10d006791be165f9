mod core;
mod presentation;
mod sync;

#[cfg(test)]
mod tests;

pub use crate::core::{
    domain::{
        error::{DashboardError, DashboardResult, ValidationError},
        model::{
            dashboard_config::{
                DEFAULT_POLL_INTERVAL, DEFAULT_TICK_INTERVAL, DashboardConfig, RateLimitConfig,
            },
            node_record::NodeRecord,
            stats_snapshot::{BarWidth, RatioBar, StatCounter, StatsSnapshot},
            view_state::{EarningFilter, FilterSettings, ViewState},
        },
        value_object::{
            DashboardUrl, EffectiveActivity, EndpointKind, NodeTimestamp, PAGE_SIZE_OPTIONS,
            PageSize, TriState, Uplink,
        },
    },
    infrastructure::{api_client::ApiClient, source::DashboardSource},
};
pub use crate::presentation::{
    derived_fields::{
        ActivityCell, AddressCell, BadgeStyle, DisplayRow, Indicator, IndicatorKind, PeerCell,
        ProtocolBadge, SignalTier, StatusIcons, Tone,
    },
    filter::{FilterPredicate, FilterRule},
    table::{
        ActivityLabel, Column, NodeTable, Paging, SortDirection, SortOrder, TableConfig, TablePage,
    },
    time_format::{RelativeAge, time_ago},
    view::DashboardView,
};
pub use crate::sync::{
    controller::{DashboardEvent, DataSyncController, LOAD_FAILURE_MESSAGE, UserCommand},
    scheduler::{DashboardHandle, RefreshScheduler},
};

use std::sync::Arc;
use std::time::Duration;

/// A polling dashboard over a relay-node backend
///
/// The dashboard fetches the node list and the fleet statistics on a fixed
/// interval and pushes everything the user sees into a [`DashboardView`]:
/// - stats counters and ratio bars
/// - the filtered, searched, sorted and paginated node table
/// - per-second relative-time labels and a refresh countdown
///
/// # Examples
///
/// ```no_run
/// use relay_dashboard::{Dashboard, DashboardResult, DashboardView};
/// # use relay_dashboard::{ActivityLabel, RatioBar, StatCounter, TablePage};
/// # struct MyView;
/// # impl DashboardView for MyView {
/// #     fn set_counter(&mut self, _: StatCounter, _: u64) {}
/// #     fn set_bar_width(&mut self, _: RatioBar, _: f64) {}
/// #     fn render_table(&mut self, _: &TablePage) {}
/// #     fn hide_loading(&mut self) {}
/// #     fn show_load_failure(&mut self, _: &str) {}
/// #     fn set_sync_status(&mut self, _: &str) {}
/// #     fn update_activity_labels(&mut self, _: &[ActivityLabel]) {}
/// # }
///
/// #[tokio::main]
/// async fn main() -> DashboardResult<()> {
///     let dashboard = Dashboard::builder()
///         .base_url("https://nodes.example.com/proxy.php")?
///         .page_size(50)?
///         .build()?;
///
///     let handle = dashboard.start(MyView);
///     tokio::signal::ctrl_c().await.ok();
///     handle.shutdown();
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    config: DashboardConfig,
}

/// Builder for Dashboard configuration
#[derive(Debug, Default)]
pub struct DashboardBuilder {
    base_url: Option<String>,
    config: DashboardConfig,
}

impl DashboardBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> DashboardResult<Self> {
        self.base_url = Some(url.into());
        Ok(self)
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    /// Sets the initial table page length; must be one of [`PAGE_SIZE_OPTIONS`].
    pub fn page_size(mut self, size: usize) -> DashboardResult<Self> {
        self.config.page_size = PageSize::new(size)?;
        Ok(self)
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.config.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Validates the settings and builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the base URL is missing or invalid or
    /// an interval is zero, and a connection error when the HTTP client
    /// cannot be created.
    pub fn build(self) -> DashboardResult<Dashboard> {
        let base_url = DashboardUrl::new(&self.base_url.ok_or_else(|| {
            DashboardError::from(ValidationError::Field {
                field: "base_url".to_string(),
                message: "Base URL is required".to_string(),
            })
        })?)?;

        for (field, interval) in [
            ("poll_interval", self.config.poll_interval),
            ("tick_interval", self.config.tick_interval),
        ] {
            if interval.is_zero() {
                return Err(ValidationError::Field {
                    field: field.to_string(),
                    message: "Interval must be greater than zero".to_string(),
                }
                .into());
            }
        }

        let client = ApiClient::new(base_url, &self.config)?;
        Ok(Dashboard {
            client,
            config: self.config,
        })
    }
}

impl Dashboard {
    /// Creates a new builder for Dashboard configuration
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// The HTTP client used by the poll cycles.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Starts polling and ticking into `view`.
    ///
    /// The first poll cycle runs immediately. Must be called from within a
    /// Tokio runtime.
    pub fn start<V>(&self, view: V) -> DashboardHandle
    where
        V: DashboardView + 'static,
    {
        let controller = DataSyncController::new(view, &self.config);
        RefreshScheduler::new(Arc::new(self.client.clone()), &self.config).start(controller)
    }
}
