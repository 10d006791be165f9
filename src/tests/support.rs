//! A `DashboardView` that records every call, shared between the test and
//! the controller (or scheduler task) that owns it.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::{
        stats_snapshot::{RatioBar, StatCounter},
        view_state::EarningFilter,
    },
};
use crate::presentation::{
    table::{ActivityLabel, TablePage},
    view::DashboardView,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub(crate) struct Recorded {
    pub counters: HashMap<StatCounter, u64>,
    pub bars: HashMap<RatioBar, f64>,
    pub pages: Vec<TablePage>,
    pub loading_hidden: bool,
    pub failures: Vec<String>,
    pub sync_status: Option<String>,
    pub activity_labels: Vec<Vec<ActivityLabel>>,
    pub clear_search_visible: Option<bool>,
    pub earning_indicator: Option<EarningFilter>,
    pub clipboard: Vec<String>,
}

impl Recorded {
    pub fn last_page(&self) -> Option<&TablePage> {
        self.pages.last()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingView {
    recorded: Arc<Mutex<Recorded>>,
    clipboard_denied: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose clipboard always refuses.
    pub fn without_clipboard() -> Self {
        Self {
            clipboard_denied: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }
}

impl DashboardView for RecordingView {
    fn set_counter(&mut self, counter: StatCounter, value: u64) {
        self.recorded().counters.insert(counter, value);
    }

    fn set_bar_width(&mut self, bar: RatioBar, percent: f64) {
        self.recorded().bars.insert(bar, percent);
    }

    fn render_table(&mut self, page: &TablePage) {
        self.recorded().pages.push(page.clone());
    }

    fn hide_loading(&mut self) {
        self.recorded().loading_hidden = true;
    }

    fn show_load_failure(&mut self, message: &str) {
        self.recorded().failures.push(message.to_string());
    }

    fn set_sync_status(&mut self, status: &str) {
        self.recorded().sync_status = Some(status.to_string());
    }

    fn update_activity_labels(&mut self, labels: &[ActivityLabel]) {
        self.recorded().activity_labels.push(labels.to_vec());
    }

    fn set_clear_search_visible(&mut self, visible: bool) {
        self.recorded().clear_search_visible = Some(visible);
    }

    fn set_earning_indicator(&mut self, filter: EarningFilter) {
        self.recorded().earning_indicator = Some(filter);
    }

    fn copy_to_clipboard(&mut self, text: &str) -> DashboardResult<()> {
        if self.clipboard_denied {
            return Err(DashboardError::View("clipboard permission denied".to_string()));
        }
        self.recorded().clipboard.push(text.to_string());
        Ok(())
    }
}
