//! In-memory node table: holds the current row set and turns it into a
//! filtered, searched, sorted, paginated page on every draw.
//!
//! Row replacement is always wholesale. Diffing is left to whatever renders
//! the resulting [`TablePage`].

use crate::core::domain::{
    error::{DashboardResult, ValidationError},
    model::node_record::NodeRecord,
    value_object::PageSize,
};
use crate::presentation::{
    derived_fields::{DisplayRow, ProtocolBadge, location_label, moniker_label},
    filter::FilterPredicate,
    time_format::time_ago,
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// The seven display columns, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Address,
    Status,
    Moniker,
    Peers,
    Location,
    Protocol,
    LastActivity,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Address,
        Column::Status,
        Column::Moniker,
        Column::Peers,
        Column::Location,
        Column::Protocol,
        Column::LastActivity,
    ];

    /// The status cluster has no meaningful order.
    #[must_use]
    pub fn is_orderable(self) -> bool {
        self != Column::Status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortOrder {
    pub column: Column,
    pub direction: SortDirection,
}

/// Construction-time settings of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub page_size: PageSize,
    pub order: SortOrder,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            order: SortOrder {
                column: Column::Peers,
                direction: SortDirection::Descending,
            },
        }
    }
}

/// Where a draw leaves the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Back to the first page (filter, search, sort or page-size changes).
    Reset,
    /// Stay on the current page, clamped to the last one (data refreshes).
    Preserve,
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    pub rows: Vec<DisplayRow>,
    /// Zero-based page index.
    pub page: usize,
    pub page_count: usize,
    /// One-based index of the first row shown; 0 when nothing matches.
    pub start: usize,
    /// One-based index of the last row shown.
    pub end: usize,
    /// Rows passing filters and search.
    pub filtered: usize,
    /// Rows in the table.
    pub total: usize,
}

impl TablePage {
    /// "Showing 1 to 25 of 340 nodes".
    #[must_use]
    pub fn info(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TablePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} nodes",
            self.start, self.end, self.filtered
        )?;
        if self.filtered != self.total {
            write!(f, " (filtered from {} total nodes)", self.total)?;
        }
        Ok(())
    }
}

/// Relative-time label of one visible row, refreshed every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLabel {
    pub address: String,
    pub label: String,
    pub failed: bool,
}

/// The node table.
#[derive(Debug, Clone)]
pub struct NodeTable {
    rows: Vec<NodeRecord>,
    order: SortOrder,
    page_size: usize,
    page: usize,
    /// Indices into `rows` shown by the last draw.
    page_rows: Vec<usize>,
}

impl NodeTable {
    /// Builds a table over an initial row set. Nothing is visible until the
    /// first [`NodeTable::draw`].
    #[must_use]
    pub fn new(rows: Vec<NodeRecord>, config: TableConfig) -> Self {
        Self {
            rows,
            order: config.order,
            page_size: config.page_size.get(),
            page: 0,
            page_rows: Vec::new(),
        }
    }

    /// Replaces the whole row set. Call [`NodeTable::draw`] afterwards.
    pub fn replace_rows(&mut self, rows: Vec<NodeRecord>) {
        self.rows = rows;
        self.page_rows.clear();
    }

    #[must_use]
    pub fn rows(&self) -> &[NodeRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size.get();
    }

    /// Changes the ordering.
    ///
    /// # Errors
    /// Returns a validation error for a column that cannot be ordered.
    pub fn set_order(&mut self, order: SortOrder) -> DashboardResult<()> {
        if !order.column.is_orderable() {
            return Err(ValidationError::ConstraintViolation(format!(
                "Column {:?} cannot be ordered",
                order.column
            ))
            .into());
        }
        self.order = order;
        Ok(())
    }

    /// Moves to a page; the next draw clamps it to the available range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Applies filter, search, order and pagination to the current row set.
    ///
    /// The predicate and search are taken as they are at draw time, so a
    /// draw triggered by a data refresh honors settings changed meanwhile.
    pub fn draw(
        &mut self,
        predicate: &FilterPredicate,
        search: &str,
        paging: Paging,
        now: DateTime<Utc>,
    ) -> TablePage {
        let terms: Vec<String> = search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let mut visible: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, record)| predicate.matches(record))
            .filter(|(_, record)| terms.is_empty() || matches_search(record, &terms, now))
            .map(|(index, _)| index)
            .collect();

        let order = self.order;
        visible.sort_by(|&a, &b| {
            let ordering = compare(&self.rows[a], &self.rows[b], order.column);
            match order.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let page_count = visible.len().div_ceil(self.page_size);
        self.page = match paging {
            Paging::Reset => 0,
            Paging::Preserve => self.page.min(page_count.saturating_sub(1)),
        };

        let first = self.page * self.page_size;
        let last = (first + self.page_size).min(visible.len());
        self.page_rows = visible.get(first..last).map(<[usize]>::to_vec).unwrap_or_default();

        TablePage {
            rows: self
                .page_rows
                .iter()
                .map(|&index| DisplayRow::of(&self.rows[index], now))
                .collect(),
            page: self.page,
            page_count,
            start: if last > first { first + 1 } else { 0 },
            end: last,
            filtered: visible.len(),
            total: self.rows.len(),
        }
    }

    /// Fresh relative-time labels for the rows on the current page.
    #[must_use]
    pub fn activity_labels(&self, now: DateTime<Utc>) -> Vec<ActivityLabel> {
        self.page_rows
            .iter()
            .filter_map(|&index| self.rows.get(index))
            .map(|record| {
                let activity = record.effective_activity();
                ActivityLabel {
                    address: record.address.clone(),
                    label: time_ago(activity.timestamp, now),
                    failed: activity.failed,
                }
            })
            .collect()
    }
}

fn matches_search(record: &NodeRecord, terms: &[String], now: DateTime<Utc>) -> bool {
    let haystack = searchable_text(record, now).to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

fn searchable_text(record: &NodeRecord, now: DateTime<Utc>) -> String {
    format!(
        "{} {} {} {} {} {}",
        record.address,
        moniker_label(record.moniker.as_deref()),
        record.peers,
        location_label(record.country.as_deref(), record.city.as_deref()),
        ProtocolBadge::of(record.service_type.as_deref()).label,
        time_ago(record.effective_activity().timestamp, now),
    )
}

fn compare(a: &NodeRecord, b: &NodeRecord, column: Column) -> Ordering {
    match column {
        Column::Address => a.address.cmp(&b.address),
        Column::Status => Ordering::Equal,
        Column::Moniker => compare_text(a.moniker.as_deref(), b.moniker.as_deref()),
        Column::Peers => a.peers.cmp(&b.peers),
        Column::Location => location_label(a.country.as_deref(), a.city.as_deref())
            .to_lowercase()
            .cmp(&location_label(b.country.as_deref(), b.city.as_deref()).to_lowercase()),
        Column::Protocol => compare_text(a.service_type.as_deref(), b.service_type.as_deref()),
        Column::LastActivity => activity_millis(a).cmp(&activity_millis(b)),
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    a.unwrap_or_default()
        .to_lowercase()
        .cmp(&b.unwrap_or_default().to_lowercase())
}

fn activity_millis(record: &NodeRecord) -> i64 {
    record
        .effective_activity()
        .timestamp
        .and_then(|ts| ts.epoch_millis())
        .unwrap_or(i64::MIN)
}
