//! Row-selection state for one table instance.

use std::collections::BTreeSet;

/// How many rows a bulk action would target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Number of targeted rows. When `all_matching` is set this is the
    /// last fetched `total_elements`, which may be stale relative to the
    /// bulk action's execution time; reconciliation is server-side.
    pub count: u64,
    pub all_matching: bool,
}

/// Selected rows within one filter/sort context.
///
/// `select_all_matching` means "every row matching the current filter,
/// across all pages", not the materialized id set. When the flag is set
/// the explicit ids are ignored for counting but kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState<K: Ord> {
    selected: BTreeSet<K>,
    select_all_matching: bool,
}

impl<K: Ord> Default for SelectionState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> SelectionState<K> {
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            select_all_matching: false,
        }
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.select_all_matching || self.selected.contains(key)
    }

    pub fn selected_ids(&self) -> &BTreeSet<K> {
        &self.selected
    }

    pub fn all_matching(&self) -> bool {
        self.select_all_matching
    }

    pub fn is_empty(&self) -> bool {
        !self.select_all_matching && self.selected.is_empty()
    }

    /// Flip one row. An explicit per-row action always supersedes
    /// "select all matching".
    pub fn toggle_row(&mut self, key: K) {
        self.select_all_matching = false;
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    /// All-or-none toggle for the visible page: if every given id is
    /// already selected, deselect them all; otherwise select the missing
    /// ones. Explicit page toggles also supersede "select all matching".
    pub fn toggle_page(&mut self, page_keys: impl IntoIterator<Item = K>) {
        self.select_all_matching = false;
        let keys: Vec<K> = page_keys.into_iter().collect();
        if keys.is_empty() {
            return;
        }

        let page_fully_selected = keys.iter().all(|k| self.selected.contains(k));
        if page_fully_selected {
            for key in keys {
                self.selected.remove(&key);
            }
        } else {
            for key in keys {
                self.selected.insert(key);
            }
        }
    }

    /// Switch to "every row matching the current filter" mode. The
    /// explicit id set is left in place for display.
    pub fn select_all_matching(&mut self) {
        self.select_all_matching = true;
    }

    /// Drop the flag and every explicit id.
    pub fn clear(&mut self) {
        self.select_all_matching = false;
        self.selected.clear();
    }

    /// Bulk-action target count given the last fetched total.
    pub fn summary(&self, total_elements: u64) -> SelectionSummary {
        if self.select_all_matching {
            SelectionSummary {
                count: total_elements,
                all_matching: true,
            }
        } else {
            SelectionSummary {
                count: self.selected.len() as u64,
                all_matching: false,
            }
        }
    }
}
