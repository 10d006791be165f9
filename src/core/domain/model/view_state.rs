//! Session-scoped UI state: filter settings, last sync instant, table lifecycle.

use crate::core::domain::value_object::PageSize;
use chrono::{DateTime, Utc};
use std::fmt;

/// Position of the three-way earning switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EarningFilter {
    #[default]
    All,
    Earning,
    NotEarning,
}

impl fmt::Display for EarningFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EarningFilter::All => "all",
            EarningFilter::Earning => "earning",
            EarningFilter::NotEarning => "not-earning",
        })
    }
}

/// Everything the user can set to narrow the node table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub earning: EarningFilter,
    pub healthy_only: bool,
    pub whitelisted_only: bool,
    pub residential_only: bool,
    /// Free-text table search.
    pub search: String,
    pub page_size: PageSize,
}

/// Process-wide view state, created once and mutated by user commands and syncs.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filters: FilterSettings,
    /// Set on every successful node sync.
    pub last_update: Option<DateTime<Utc>>,
    /// Whether the node table has been built by a first successful load.
    pub table_materialized: bool,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            filters: FilterSettings {
                page_size,
                ..Default::default()
            },
            last_update: None,
            table_materialized: false,
        }
    }
}
