//! Row-expansion state with a lazily filled detail cache.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::FetchError;

/// What the caller must do after an expand toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandAction {
    /// The row was already expanded and is now collapsed.
    Collapsed,
    /// The row is expanded and its detail is cached or already in flight.
    Expanded,
    /// The row is expanded and the caller must issue one detail fetch.
    FetchNeeded,
}

/// At most one expanded row per table; detail payloads cached by row key
/// for the lifetime of the current content array.
#[derive(Debug, Clone)]
pub struct ExpandState<K: Ord + Clone, D> {
    expanded: Option<K>,
    details: BTreeMap<K, D>,
    loading: BTreeSet<K>,
    errors: BTreeMap<K, FetchError>,
}

impl<K: Ord + Clone, D> Default for ExpandState<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, D> ExpandState<K, D> {
    pub fn new() -> Self {
        Self {
            expanded: None,
            details: BTreeMap::new(),
            loading: BTreeSet::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn expanded(&self) -> Option<&K> {
        self.expanded.as_ref()
    }

    pub fn detail(&self, key: &K) -> Option<&D> {
        self.details.get(key)
    }

    pub fn error(&self, key: &K) -> Option<&FetchError> {
        self.errors.get(key)
    }

    pub fn is_loading(&self, key: &K) -> bool {
        self.loading.contains(key)
    }

    /// Toggle expansion for `key`.
    ///
    /// Expanding a different row collapses the previous one. Repeated
    /// expansion of a row whose detail is still loading reports
    /// `Expanded`, never a second `FetchNeeded`.
    pub fn expand(&mut self, key: K) -> ExpandAction {
        if self.expanded.as_ref() == Some(&key) {
            self.expanded = None;
            return ExpandAction::Collapsed;
        }

        self.expanded = Some(key.clone());

        if self.details.contains_key(&key) || self.loading.contains(&key) {
            return ExpandAction::Expanded;
        }

        self.errors.remove(&key);
        self.loading.insert(key);
        ExpandAction::FetchNeeded
    }

    /// Record the outcome of a detail fetch.
    ///
    /// A completion for a key that is no longer marked loading (the list
    /// was refetched in the meantime) is discarded.
    pub fn complete(&mut self, key: K, outcome: Result<D, FetchError>) {
        if !self.loading.remove(&key) {
            tracing::debug!("discarding stale detail response");
            return;
        }
        match outcome {
            Ok(detail) => {
                self.errors.remove(&key);
                self.details.insert(key, detail);
            }
            Err(error) => {
                self.errors.insert(key, error);
            }
        }
    }

    /// Drop everything: expansion, cache, in-flight markers, errors.
    ///
    /// Called when the underlying list is refetched; the cache's lifetime
    /// is the current content array.
    pub fn invalidate(&mut self) {
        self.expanded = None;
        self.details.clear();
        self.loading.clear();
        self.errors.clear();
    }
}
