//! Filter/sort view-model for the host table
//!
//! Holds the authoritative host list and a derived projection of visible
//! rows. The projection is recomputed inside every mutating call, so
//! `visible()` always equals `sort(filter(all))`.

use std::cmp::Ordering;
use tracing::debug;

use crate::host::{HostColumn, HostRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn marker(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: HostColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(column: HostColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: HostColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    fn compare(&self, a: &HostRecord, b: &HostRecord) -> Ordering {
        let ord = a.field(self.column).cmp(b.field(self.column));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostTable {
    hosts: Vec<HostRecord>,
    filter_text: String,
    sort: Option<SortKey>,
    /// Indices into `hosts`, in display order
    visible: Vec<usize>,
    /// Index into `visible`
    selected: Option<usize>,
}

impl HostTable {
    pub fn new(hosts: Vec<HostRecord>) -> Self {
        let mut table = Self::default();
        table.replace_hosts(hosts);
        table
    }

    /// Replace the authoritative list (initial load or reload).
    ///
    /// Filter text and sort key are kept; the first visible row is selected.
    pub fn replace_hosts(&mut self, hosts: Vec<HostRecord>) {
        self.hosts = hosts;
        self.selected = None;
        self.recompute();
        self.select_first();
    }

    pub fn all(&self) -> &[HostRecord] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.filter_text {
            return;
        }
        self.filter_text = text;
        self.recompute();
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        self.recompute();
    }

    /// Header-click cycle: ascending, descending, unsorted.
    pub fn toggle_sort(&mut self, column: HostColumn) {
        let next = match self.sort {
            Some(key) if key.column == column => match key.direction {
                SortDirection::Ascending => Some(SortKey::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortKey::ascending(column)),
        };
        self.set_sort(next);
    }

    pub fn visible(&self) -> impl Iterator<Item = &HostRecord> + '_ {
        self.visible.iter().map(move |idx| &self.hosts[*idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_at(&self, index: usize) -> Option<&HostRecord> {
        self.visible.get(index).map(|idx| &self.hosts[*idx])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&HostRecord> {
        self.selected.and_then(|idx| self.visible_at(idx))
    }

    /// Select a visible row; out-of-range indices clamp to the last row.
    pub fn select(&mut self, index: usize) {
        self.selected = match self.visible.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(usize::MAX);
    }

    pub fn select_next(&mut self) {
        match self.selected {
            Some(idx) => self.select(idx.saturating_add(1)),
            None => self.select_first(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.selected {
            Some(idx) => self.select(idx.saturating_sub(1)),
            None => self.select_first(),
        }
    }

    pub fn page_down(&mut self, rows: usize) {
        let current = self.selected.unwrap_or(0);
        self.select(current.saturating_add(rows.max(1)));
    }

    pub fn page_up(&mut self, rows: usize) {
        let current = self.selected.unwrap_or(0);
        self.select(current.saturating_sub(rows.max(1)));
    }

    fn recompute(&mut self) {
        let selected_host = self
            .selected
            .and_then(|idx| self.visible.get(idx))
            .copied();

        // Whitespace-only text matches everything; otherwise spaces are part of the needle.
        let match_all = self.filter_text.trim().is_empty();
        let needle = self.filter_text.to_lowercase();
        let mut visible: Vec<usize> = self
            .hosts
            .iter()
            .enumerate()
            .filter(|(_, host)| match_all || host.matches_lowercase(&needle))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(key) = self.sort {
            // Stable: ties keep insertion order.
            visible.sort_by(|a, b| key.compare(&self.hosts[*a], &self.hosts[*b]));
        }
        self.visible = visible;

        self.selected = match selected_host.and_then(|host_idx| {
            self.visible.iter().position(|idx| *idx == host_idx)
        }) {
            Some(pos) => Some(pos),
            None if self.visible.is_empty() => None,
            None => Some(0),
        };

        debug!(
            filter = %self.filter_text,
            sort = ?self.sort,
            visible = self.visible.len(),
            total = self.hosts.len(),
            "Recomputed host view"
        );
    }
}
