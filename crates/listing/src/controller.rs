//! The generic controller behind every admin table.
//!
//! One instance owns the query state, phase, selection, and row-expansion
//! state for one paginated collection view. Network fetch is its only
//! side effect, and even that is performed through injected fetchers; the
//! controller itself never touches the DOM, storage, or global state.

use std::sync::Arc;

use crate::error::FetchError;
use crate::expand::{ExpandAction, ExpandState};
use crate::fetch::{DetailFetcher, ListFetcher, MutationOutcome};
use crate::query::{FilterValue, ListQuery, Sort, clamp_page};
use crate::result::{ListResult, PageInfo};
use crate::selection::{SelectionState, SelectionSummary};

/// A row the controller can track. Keys identify rows across refetches.
pub trait ListRow {
    type Key: Clone + Ord + core::fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

/// Lifecycle of the list itself. There is no terminal state; the
/// controller lives as long as its owning view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Errored(FetchError),
}

/// Handle for one in-flight list fetch.
///
/// Carries the generation the fetch was started under; applying it after
/// a newer query-state mutation is a no-op discard (last-request-wins via
/// discard check, not cancellation).
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Handle for one detail fetch the caller must perform.
#[derive(Debug, Clone)]
pub struct DetailTicket<K> {
    key: K,
}

impl<K> DetailTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Whether an apply took effect or was discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    Discarded,
}

/// Query + selection + expansion state for one paginated collection.
pub struct ListController<R: ListRow, D> {
    query: ListQuery,
    phase: Phase,
    rows: Vec<R>,
    page_info: Option<PageInfo>,
    selection: SelectionState<R::Key>,
    expand: ExpandState<R::Key, D>,
    generation: u64,
    refresh_needed: bool,
    list_fetcher: Arc<dyn ListFetcher<R>>,
    detail_fetcher: Arc<dyn DetailFetcher<R::Key, D>>,
}

impl<R: ListRow, D> ListController<R, D> {
    /// A controller in its initial `Loading` phase; the first fetch fires
    /// on mount via [`refresh`](Self::refresh).
    pub fn new(
        list_fetcher: Arc<dyn ListFetcher<R>>,
        detail_fetcher: Arc<dyn DetailFetcher<R::Key, D>>,
    ) -> Self {
        Self::with_query(ListQuery::default(), list_fetcher, detail_fetcher)
    }

    pub fn with_query(
        query: ListQuery,
        list_fetcher: Arc<dyn ListFetcher<R>>,
        detail_fetcher: Arc<dyn DetailFetcher<R::Key, D>>,
    ) -> Self {
        Self {
            query,
            phase: Phase::Loading,
            rows: Vec::new(),
            page_info: None,
            selection: SelectionState::new(),
            expand: ExpandState::new(),
            generation: 0,
            refresh_needed: false,
            list_fetcher,
            detail_fetcher,
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Query-state mutations (each one supersedes any in-flight fetch)
    // ────────────────────────────────────────────────────────────────────

    /// Update one filter. Resets the page to 0 and empties the selection.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.query.set_filter(key, value);
        self.selection.clear();
        self.mark_dirty();
    }

    /// Remove one filter. Resets the page to 0 and empties the selection.
    pub fn clear_filter(&mut self, key: &str) {
        self.query.clear_filter(key);
        self.selection.clear();
        self.mark_dirty();
    }

    /// Replace the sort. Resets the page to 0 and empties the selection.
    pub fn set_sort(&mut self, sort: Sort) {
        self.query.set_sort(sort);
        self.selection.clear();
        self.mark_dirty();
    }

    /// Navigate to a page. Out-of-range requests are clamped, not
    /// rejected. Selection survives pagination.
    pub fn set_page(&mut self, requested: i64) {
        let total_pages = self.page_info.map(|p| p.total_pages).unwrap_or(0);
        self.query.set_page(clamp_page(requested, total_pages));
        self.mark_dirty();
    }

    /// Reset for a new owning scope (e.g. the admin switched expos):
    /// filters, sort, selection, and cache all go back to their initial
    /// state.
    pub fn reset_scope(&mut self) {
        self.query = ListQuery::with_size(self.query.size());
        self.selection.clear();
        self.expand.invalidate();
        self.page_info = None;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.generation += 1;
        self.phase = Phase::Loading;
    }

    // ────────────────────────────────────────────────────────────────────
    // Fetch protocol
    // ────────────────────────────────────────────────────────────────────

    /// Start a fetch for the current query state.
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply a list response. Responses whose ticket predates the current
    /// query state are discarded so a slow earlier response can never
    /// overwrite a newer query's rows.
    pub fn apply_list(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<ListResult<R>, FetchError>,
    ) -> Applied {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale list response"
            );
            return Applied::Discarded;
        }

        match outcome {
            Ok(result) => {
                if let Err(envelope) = result.validate() {
                    self.phase = Phase::Errored(envelope);
                    return Applied::Applied;
                }
                // The server may clamp the requested page; adopt its echo.
                if result.page.number != self.query.page() {
                    self.query.set_page(result.page.number);
                }
                self.rows = result.content;
                self.page_info = Some(result.page);
                self.expand.invalidate();
                self.refresh_needed = false;
                self.phase = Phase::Loaded;
            }
            Err(error) => {
                tracing::warn!(error = %error, "list fetch failed");
                // Query state is preserved so the same query can be retried.
                self.phase = Phase::Errored(error);
            }
        }
        Applied::Applied
    }

    /// Fetch and apply the current query against the bound fetcher.
    pub async fn refresh(&mut self) -> Applied {
        let ticket = self.begin_fetch();
        let fetcher = Arc::clone(&self.list_fetcher);
        let outcome = fetcher.fetch_page(ticket.query()).await;
        self.apply_list(ticket, outcome)
    }

    // ────────────────────────────────────────────────────────────────────
    // Row expansion
    // ────────────────────────────────────────────────────────────────────

    /// Toggle expansion of `key`. Returns a ticket when the caller must
    /// issue a detail fetch; repeated expansion of an already-loading row
    /// never yields a second ticket.
    pub fn expand_row(&mut self, key: R::Key) -> Option<DetailTicket<R::Key>> {
        match self.expand.expand(key.clone()) {
            ExpandAction::FetchNeeded => Some(DetailTicket { key }),
            ExpandAction::Expanded | ExpandAction::Collapsed => None,
        }
    }

    /// Record a detail fetch outcome. Late responses for keys the cache
    /// no longer tracks (the list was refetched) are discarded.
    pub fn apply_detail(&mut self, ticket: DetailTicket<R::Key>, outcome: Result<D, FetchError>) {
        self.expand.complete(ticket.key, outcome);
    }

    /// Toggle expansion and run the detail fetch when one is needed.
    pub async fn expand(&mut self, key: R::Key) {
        if let Some(ticket) = self.expand_row(key) {
            let fetcher = Arc::clone(&self.detail_fetcher);
            let outcome = fetcher.fetch_detail(ticket.key()).await;
            self.apply_detail(ticket, outcome);
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Selection
    // ────────────────────────────────────────────────────────────────────

    pub fn toggle_row(&mut self, key: R::Key) {
        self.selection.toggle_row(key);
    }

    /// All-or-none toggle over the currently visible page.
    pub fn toggle_visible_page(&mut self) {
        let keys: Vec<R::Key> = self.rows.iter().map(ListRow::key).collect();
        self.selection.toggle_page(keys);
    }

    pub fn select_all_matching(&mut self) {
        self.selection.select_all_matching();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &R::Key) -> bool {
        self.selection.is_selected(key)
    }

    pub fn selection(&self) -> &SelectionState<R::Key> {
        &self.selection
    }

    /// Bulk-action target count based on the last fetched total.
    pub fn selection_summary(&self) -> SelectionSummary {
        let total = self.page_info.map(|p| p.total_elements).unwrap_or(0);
        self.selection.summary(total)
    }

    // ────────────────────────────────────────────────────────────────────
    // Mutations
    // ────────────────────────────────────────────────────────────────────

    /// Fold a confirmed mutation response into the list.
    ///
    /// The list is never optimistically mutated; this is only called with
    /// a successful server response. A single updated record merges into
    /// its visible row (or is ignored when not on the current page); a
    /// collection response flags a full refetch instead.
    pub fn apply_mutation(&mut self, outcome: MutationOutcome<R>) {
        match outcome {
            MutationOutcome::Updated(row) => {
                let key = row.key();
                if let Some(existing) = self.rows.iter_mut().find(|r| r.key() == key) {
                    *existing = row;
                }
            }
            MutationOutcome::Replaced(_) => {
                self.refresh_needed = true;
            }
        }
    }

    /// Whether a mutation response demanded a full refetch.
    pub fn needs_refresh(&self) -> bool {
        self.refresh_needed
    }

    // ────────────────────────────────────────────────────────────────────
    // View data
    // ────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// List-level fetch error, if the last fetch failed.
    pub fn list_error(&self) -> Option<&FetchError> {
        match &self.phase {
            Phase::Errored(error) => Some(error),
            _ => None,
        }
    }

    pub fn expanded_row(&self) -> Option<&R::Key> {
        self.expand.expanded()
    }

    pub fn detail(&self, key: &R::Key) -> Option<&D> {
        self.expand.detail(key)
    }

    /// Per-row detail error; other rows remain usable.
    pub fn detail_error(&self, key: &R::Key) -> Option<&FetchError> {
        self.expand.error(key)
    }

    pub fn is_detail_loading(&self, key: &R::Key) -> bool {
        self.expand.is_loading(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
    struct Booth {
        id: i64,
        name: String,
    }

    impl ListRow for Booth {
        type Key = i64;

        fn key(&self) -> i64 {
            self.id
        }
    }

    fn booth(id: i64, name: &str) -> Booth {
        Booth {
            id,
            name: name.to_string(),
        }
    }

    fn page(content: Vec<Booth>, number: u32, total_pages: u32, total_elements: u64) -> ListResult<Booth> {
        ListResult {
            content,
            page: PageInfo {
                number,
                size: 20,
                total_pages,
                total_elements,
            },
        }
    }

    /// Serves deterministic pages derived from the query, counting calls.
    struct PagedFetcher {
        calls: AtomicUsize,
    }

    impl PagedFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ListFetcher<Booth> for PagedFetcher {
        async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<Booth>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let base = i64::from(query.page()) * 100;
            Ok(page(
                vec![booth(base + 1, "a"), booth(base + 2, "b")],
                query.page(),
                3,
                6,
            ))
        }
    }

    struct CountingDetail {
        calls: AtomicUsize,
    }

    impl CountingDetail {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DetailFetcher<i64, String> for CountingDetail {
        async fn fetch_detail(&self, key: &i64) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("detail-{}", key))
        }
    }

    fn controller() -> (
        ListController<Booth, String>,
        Arc<PagedFetcher>,
        Arc<CountingDetail>,
    ) {
        let list = Arc::new(PagedFetcher::new());
        let detail = Arc::new(CountingDetail::new());
        let controller = ListController::new(list.clone(), detail.clone());
        (controller, list, detail)
    }

    #[test]
    fn initial_phase_is_loading() {
        let (controller, _, _) = controller();
        assert_eq!(controller.phase(), &Phase::Loading);
    }

    #[test]
    fn stale_response_is_discarded() {
        let (mut c, _, _) = controller();

        c.set_filter("status", "CONFIRMED");
        let first = c.begin_fetch();

        c.set_filter("status", "CANCELLED");
        let second = c.begin_fetch();

        // The newer query's response lands first.
        assert_eq!(
            c.apply_list(second, Ok(page(vec![booth(2, "new")], 0, 1, 1))),
            Applied::Applied
        );
        // The superseded response arrives late and must be dropped.
        assert_eq!(
            c.apply_list(first, Ok(page(vec![booth(1, "old")], 0, 1, 1))),
            Applied::Discarded
        );

        assert_eq!(c.rows(), &[booth(2, "new")]);
    }

    #[test]
    fn filter_and_sort_reset_page() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![], 0, 5, 100)));

        c.set_page(3);
        assert_eq!(c.query().page(), 3);
        c.set_filter("keyword", "booth");
        assert_eq!(c.query().page(), 0);

        c.set_page(4);
        c.set_sort(Sort::asc("name"));
        assert_eq!(c.query().page(), 0);
    }

    #[test]
    fn set_page_clamps_both_ends() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![], 0, 5, 100)));

        c.set_page(50);
        assert_eq!(c.query().page(), 4);

        c.set_page(-3);
        assert_eq!(c.query().page(), 0);
    }

    #[test]
    fn set_page_before_first_result_stays_on_first_page() {
        let (mut c, _, _) = controller();
        c.set_page(7);
        assert_eq!(c.query().page(), 0);
    }

    #[tokio::test]
    async fn selection_survives_pagination() {
        let (mut c, _, _) = controller();
        c.refresh().await;

        c.toggle_row(1);
        assert!(c.is_selected(&1));

        c.set_page(1);
        c.refresh().await;
        assert!(c.is_selected(&1), "selection must survive page changes");

        c.set_page(0);
        c.refresh().await;
        assert!(c.is_selected(&1));
        assert_eq!(c.rows()[0].id, 1);
    }

    #[tokio::test]
    async fn selection_resets_on_filter_change() {
        let (mut c, _, _) = controller();
        c.refresh().await;

        c.toggle_row(1);
        c.select_all_matching();
        c.set_filter("status", "CONFIRMED");

        assert!(c.selection().is_empty());
        assert!(!c.selection().all_matching());
    }

    #[tokio::test]
    async fn toggle_visible_page_is_all_or_none() {
        let (mut c, _, _) = controller();
        c.refresh().await; // rows 1, 2

        c.toggle_row(1);
        c.toggle_visible_page();
        assert!(c.is_selected(&1) && c.is_selected(&2));

        c.toggle_visible_page();
        assert!(!c.is_selected(&1) && !c.is_selected(&2));
    }

    #[tokio::test]
    async fn refresh_applies_rows_for_current_page() {
        let (mut c, list, _) = controller();
        assert_eq!(c.refresh().await, Applied::Applied);
        assert_eq!(c.phase(), &Phase::Loaded);
        assert_eq!(c.rows().len(), 2);
        assert_eq!(list.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expand_fetches_detail_exactly_once() {
        let (mut c, _, detail) = controller();
        c.refresh().await;

        c.expand(1).await;
        assert_eq!(c.expanded_row(), Some(&1));
        assert_eq!(c.detail(&1), Some(&"detail-1".to_string()));

        c.expand(1).await; // collapse
        c.expand(1).await; // re-expand, cached
        assert_eq!(detail.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetch_invalidates_detail_cache() {
        let (mut c, _, detail) = controller();
        c.refresh().await;
        c.expand(1).await;
        assert_eq!(detail.calls.load(Ordering::SeqCst), 1);

        c.set_page(0);
        c.refresh().await;
        assert_eq!(c.expanded_row(), None, "refetch collapses the expansion");

        c.expand(1).await;
        assert_eq!(detail.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn detail_error_is_scoped_to_its_row() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![booth(1, "a"), booth(2, "b")], 0, 1, 2)));

        let ticket = c.expand_row(1).expect("first expansion needs a fetch");
        c.apply_detail(ticket, Err(FetchError::Status(502)));

        assert_eq!(c.detail_error(&1), Some(&FetchError::Status(502)));
        assert_eq!(c.detail_error(&2), None);
        assert_eq!(c.phase(), &Phase::Loaded, "list stays usable");
    }

    #[test]
    fn fetch_failure_preserves_query_state() {
        let (mut c, _, _) = controller();
        c.set_filter("status", "CONFIRMED");
        let before = c.query().clone();

        let t = c.begin_fetch();
        c.apply_list(t, Err(FetchError::Network("connection reset".into())));

        assert!(matches!(c.phase(), Phase::Errored(_)));
        assert_eq!(c.query(), &before, "user can retry the same query");
    }

    #[test]
    fn server_clamped_page_number_is_adopted() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![], 0, 3, 60)));

        c.set_page(2);
        let t = c.begin_fetch();
        // Server clamped the request down to its last page.
        c.apply_list(t, Ok(page(vec![booth(9, "z")], 1, 2, 40)));
        assert_eq!(c.query().page(), 1);
    }

    #[test]
    fn overfull_envelope_is_an_error() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        let bad = ListResult {
            content: vec![booth(1, "a"), booth(2, "b")],
            page: PageInfo {
                number: 0,
                size: 1,
                total_pages: 1,
                total_elements: 2,
            },
        };
        c.apply_list(t, Ok(bad));
        assert!(matches!(c.phase(), Phase::Errored(FetchError::Envelope(_))));
    }

    #[test]
    fn single_record_mutation_merges_in_place() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![booth(1, "a"), booth(2, "b")], 0, 1, 2)));

        c.apply_mutation(MutationOutcome::Updated(booth(2, "renamed")));
        assert_eq!(c.rows()[1], booth(2, "renamed"));
        assert!(!c.needs_refresh());

        // A record that is not on the current page is ignored.
        c.apply_mutation(MutationOutcome::Updated(booth(77, "elsewhere")));
        assert_eq!(c.rows().len(), 2);
    }

    #[test]
    fn collection_mutation_response_flags_refresh() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![booth(1, "a")], 0, 1, 1)));

        c.apply_mutation(MutationOutcome::Replaced(vec![booth(1, "a"), booth(2, "b")]));
        assert!(c.needs_refresh());

        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![booth(1, "a"), booth(2, "b")], 0, 1, 2)));
        assert!(!c.needs_refresh(), "an applied refetch clears the flag");
    }

    #[tokio::test]
    async fn scope_reset_clears_filters_and_selection() {
        let (mut c, _, _) = controller();
        c.refresh().await;
        c.set_filter("keyword", "booth");
        c.toggle_row(1);

        c.reset_scope();
        assert!(c.query().filters().is_empty());
        assert!(c.selection().is_empty());
        assert_eq!(c.phase(), &Phase::Loading);
    }

    #[test]
    fn selection_summary_reflects_all_matching_total() {
        let (mut c, _, _) = controller();
        let t = c.begin_fetch();
        c.apply_list(t, Ok(page(vec![booth(1, "a")], 0, 5, 93)));

        c.toggle_row(1);
        assert_eq!(c.selection_summary().count, 1);

        c.select_all_matching();
        let summary = c.selection_summary();
        assert!(summary.all_matching);
        assert_eq!(summary.count, 93);
    }
}
