//! Query state for one server-paginated collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default page size for admin tables.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Cap on requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A scalar filter value. Absent keys mean "unconstrained".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl FilterValue {
    /// Render as a query-parameter value.
    pub fn as_param(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Integer(n) => n.to_string(),
            FilterValue::Flag(b) => b.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort criterion: a field plus a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// The opaque `sort` parameter the collection endpoints accept.
    pub fn token(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Clamp a requested page index into `0 ≤ n < max(1, total_pages)`.
///
/// Out-of-range requests are clamped, never rejected.
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let last = total_pages.max(1) - 1;
    requested.clamp(0, i64::from(last)) as u32
}

/// The full query state for one collection view.
///
/// Invariant: changing any filter or the sort resets `page` to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    size: u32,
    sort: Option<Sort>,
    filters: BTreeMap<String, FilterValue>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::with_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// A first-page query with the given page size (clamped to `1..=MAX_PAGE_SIZE`).
    pub fn with_size(size: u32) -> Self {
        Self {
            page: 0,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    /// Set one filter. Resets `page` to 0.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.insert(key.into(), value.into());
        self.page = 0;
    }

    /// Remove one filter (back to "unconstrained"). Resets `page` to 0.
    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 0;
    }

    /// Replace the sort criterion. Resets `page` to 0.
    pub fn set_sort(&mut self, sort: Sort) {
        self.sort = Some(sort);
        self.page = 0;
    }

    /// Set the page directly. Callers clamp first (see [`clamp_page`]).
    pub(crate) fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Render as collection-endpoint query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.token()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.as_param()));
        }
        params
    }
}
