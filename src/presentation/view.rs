//! The rendering capability the sync layer drives.
//!
//! A `DashboardView` is whatever actually puts pixels (or lines of text) in
//! front of the user. The controller is its only caller and owns it
//! exclusively, so every method takes `&mut self`.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::{
        stats_snapshot::{RatioBar, StatCounter},
        view_state::EarningFilter,
    },
};
use crate::presentation::table::{ActivityLabel, TablePage};

pub trait DashboardView: Send {
    /// Shows one stats counter.
    fn set_counter(&mut self, counter: StatCounter, value: u64);

    /// Sets a ratio bar's width in percent. Never called for a group whose
    /// total is 0, so the previous width stays in place.
    fn set_bar_width(&mut self, bar: RatioBar, percent: f64);

    /// Displays a freshly drawn table page.
    fn render_table(&mut self, page: &TablePage);

    /// Dismisses the loading indicator after the table is first built.
    fn hide_loading(&mut self);

    /// Replaces the loading indicator with a static failure message.
    fn show_load_failure(&mut self, message: &str);

    /// Updates the "Updated: ... | Next: ..." countdown.
    fn set_sync_status(&mut self, status: &str);

    /// Refreshes relative-time labels of the visible rows.
    fn update_activity_labels(&mut self, labels: &[ActivityLabel]);

    fn set_clear_search_visible(&mut self, _visible: bool) {}

    /// Moves the earning switch indicator.
    fn set_earning_indicator(&mut self, _filter: EarningFilter) {}

    /// Places text on the system clipboard.
    ///
    /// # Errors
    /// Views without clipboard access return `DashboardError::View`.
    fn copy_to_clipboard(&mut self, _text: &str) -> DashboardResult<()> {
        Err(DashboardError::View("clipboard not available".to_string()))
    }
}
