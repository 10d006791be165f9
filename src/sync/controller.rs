//! Single owner of the view, the view state and the node table.
//!
//! Everything that changes what the user sees goes through
//! [`DataSyncController::handle`]: fetch results, clock ticks and user
//! commands. Filters are read from the state at redraw time, so a sync that
//! completes after a filter change honors the new settings.

use crate::core::{
    domain::{
        error::DashboardResult,
        model::{
            dashboard_config::DashboardConfig,
            node_record::NodeRecord,
            stats_snapshot::{StatCounter, StatsSnapshot},
            view_state::{EarningFilter, ViewState},
        },
        value_object::PageSize,
    },
    infrastructure::source::DashboardSource,
};
use crate::presentation::{
    filter::FilterPredicate,
    table::{NodeTable, Paging, SortOrder, TableConfig},
    view::DashboardView,
};
use crate::sync::application::service::{
    node_sync_service::NodeSyncService, stats_sync_service::StatsSyncService,
};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{error, info, warn};

/// Shown in place of the loading indicator when the very first node fetch fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load nodes. Please refresh.";

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SetEarningFilter(EarningFilter),
    SetHealthyOnly(bool),
    SetWhitelistedOnly(bool),
    SetResidentialOnly(bool),
    Search(String),
    ClearSearch,
    SetPageSize(PageSize),
    /// Zero-based; clamped to the last page.
    GoToPage(usize),
    SortBy(SortOrder),
    CopyAddress(String),
}

/// Input to the controller's single-writer loop.
#[derive(Debug)]
pub enum DashboardEvent {
    Stats(DashboardResult<StatsSnapshot>),
    Nodes(DashboardResult<Vec<NodeRecord>>),
    Tick,
    Command(UserCommand),
}

pub struct DataSyncController<V> {
    view: V,
    state: ViewState,
    table: Option<NodeTable>,
    /// Ordering used when the table is first built.
    order: SortOrder,
    poll_interval: Duration,
}

impl<V: DashboardView> DataSyncController<V> {
    pub fn new(view: V, config: &DashboardConfig) -> Self {
        Self {
            view,
            state: ViewState::new(config.page_size),
            table: None,
            order: TableConfig::default().order,
            poll_interval: config.poll_interval,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The node table, once a node sync has succeeded.
    pub fn table(&self) -> Option<&NodeTable> {
        self.table.as_ref()
    }

    /// Routes one event to its handler.
    pub fn handle(&mut self, event: DashboardEvent, now: DateTime<Utc>) {
        match event {
            DashboardEvent::Stats(result) => self.apply_stats(result),
            DashboardEvent::Nodes(result) => self.apply_nodes(result, now),
            DashboardEvent::Tick => self.tick(now),
            DashboardEvent::Command(command) => self.handle_command(command, now),
        }
    }

    /// Runs one full stats cycle against `source`.
    pub async fn sync_stats<S>(&mut self, source: &S)
    where
        S: DashboardSource + ?Sized,
    {
        let result = StatsSyncService::new().execute(source).await;
        self.apply_stats(result);
    }

    /// Runs one full node cycle against `source`.
    pub async fn sync_nodes<S>(&mut self, source: &S)
    where
        S: DashboardSource + ?Sized,
    {
        let result = NodeSyncService::new().execute(source).await;
        self.apply_nodes(result, Utc::now());
    }

    /// Pushes a stats snapshot to the counters and ratio bars.
    pub fn apply_stats(&mut self, result: DashboardResult<StatsSnapshot>) {
        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                error!(error = %e, "Failed to load stats");
                return;
            }
        };

        for counter in StatCounter::ALL {
            self.view.set_counter(counter, stats.counter(counter));
        }
        for width in stats.bar_widths() {
            self.view.set_bar_width(width.bar, width.percent);
        }
    }

    /// Reconciles a node-list result into the table.
    ///
    /// The first success builds the table; later ones replace every row and
    /// redraw on the current page. Failures never touch an existing table.
    pub fn apply_nodes(&mut self, result: DashboardResult<Vec<NodeRecord>>, now: DateTime<Utc>) {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Failed to load nodes");
                if !self.state.table_materialized {
                    self.view.show_load_failure(LOAD_FAILURE_MESSAGE);
                }
                return;
            }
        };

        let paging = match self.table.as_mut() {
            Some(table) => {
                table.replace_rows(rows);
                Paging::Preserve
            }
            None => {
                info!(nodes = rows.len(), "Node table materialized");
                self.table = Some(NodeTable::new(
                    rows,
                    TableConfig {
                        page_size: self.state.filters.page_size,
                        order: self.order,
                    },
                ));
                self.state.table_materialized = true;
                self.view.hide_loading();
                Paging::Reset
            }
        };
        self.redraw(paging, now);

        self.state.last_update = Some(now);
        self.refresh_sync_status(now);
    }

    /// Per-second refresh of relative-time labels and the countdown.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let Some(table) = &self.table {
            self.view.update_activity_labels(&table.activity_labels(now));
        }
        self.refresh_sync_status(now);
    }

    /// "Updated: {n}s ago | Next: {m}s", or `None` before the first sync.
    pub fn sync_status(&self, now: DateTime<Utc>) -> Option<String> {
        let last_update = self.state.last_update?;
        let elapsed = (now - last_update).num_milliseconds().div_euclid(1000).max(0);
        let poll = i64::try_from(self.poll_interval.as_secs()).unwrap_or(i64::MAX);
        let remaining = poll.saturating_sub(elapsed).max(0);
        Some(format!("Updated: {}s ago | Next: {}s", elapsed, remaining))
    }

    pub fn handle_command(&mut self, command: UserCommand, now: DateTime<Utc>) {
        match command {
            UserCommand::SetEarningFilter(earning) => {
                self.state.filters.earning = earning;
                self.view.set_earning_indicator(earning);
                self.redraw(Paging::Reset, now);
            }
            UserCommand::SetHealthyOnly(enabled) => {
                self.state.filters.healthy_only = enabled;
                self.redraw(Paging::Reset, now);
            }
            UserCommand::SetWhitelistedOnly(enabled) => {
                self.state.filters.whitelisted_only = enabled;
                self.redraw(Paging::Reset, now);
            }
            UserCommand::SetResidentialOnly(enabled) => {
                self.state.filters.residential_only = enabled;
                self.redraw(Paging::Reset, now);
            }
            UserCommand::Search(text) => {
                self.view.set_clear_search_visible(!text.is_empty());
                self.state.filters.search = text;
                self.redraw(Paging::Reset, now);
            }
            UserCommand::ClearSearch => {
                self.handle_command(UserCommand::Search(String::new()), now);
            }
            UserCommand::SetPageSize(page_size) => {
                self.state.filters.page_size = page_size;
                if let Some(table) = self.table.as_mut() {
                    table.set_page_size(page_size);
                }
                self.redraw(Paging::Reset, now);
            }
            UserCommand::GoToPage(page) => {
                if let Some(table) = self.table.as_mut() {
                    table.set_page(page);
                }
                self.redraw(Paging::Preserve, now);
            }
            UserCommand::SortBy(order) => {
                if !order.column.is_orderable() {
                    warn!(column = ?order.column, "Ignoring sort on an unorderable column");
                    return;
                }
                self.order = order;
                if let Some(table) = self.table.as_mut() {
                    if let Err(e) = table.set_order(order) {
                        warn!(error = %e, "Sort rejected");
                        return;
                    }
                }
                self.redraw(Paging::Reset, now);
            }
            UserCommand::CopyAddress(address) => {
                if let Err(e) = self.view.copy_to_clipboard(&address) {
                    error!(error = %e, "Failed to copy text");
                }
            }
        }
    }

    fn redraw(&mut self, paging: Paging, now: DateTime<Utc>) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let predicate = FilterPredicate::from_settings(&self.state.filters);
        let page = table.draw(&predicate, &self.state.filters.search, paging, now);
        self.view.render_table(&page);
    }

    fn refresh_sync_status(&mut self, now: DateTime<Utc>) {
        if let Some(status) = self.sync_status(now) {
            self.view.set_sync_status(&status);
        }
    }
}
