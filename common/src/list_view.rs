//! List screen state
//!
//! `RecordList` holds what one list screen owns: the last successful fetch,
//! filter and page state, the loading flag, the open form and a pending
//! alert. It performs no IO. The CLI and the web front end drive it from
//! their own fetch/mutate calls and report the results back through
//! `finish_fetch` / `finish_mutation`.
//!
//! Rows shown are always `paginate(apply_filters(records, filter), page)`,
//! recomputed on every call.

use crate::error::BackendError;
use crate::filter::{apply_filters, FilterState};
use crate::kind::TOTAL_CARD;
use crate::paginate::{paginate, PageControls, PageState};
use crate::summary::{summary_counts, SummaryCount};
use crate::types::ListRecord;

/// Create/edit form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState<R> {
    #[default]
    Closed,
    Create(R),
    Edit(R),
}

impl<R> FormState<R> {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            FormState::Closed => None,
            FormState::Create(r) | FormState::Edit(r) => Some(r),
        }
    }

    pub fn record_mut(&mut self) -> Option<&mut R> {
        match self {
            FormState::Closed => None,
            FormState::Create(r) | FormState::Edit(r) => Some(r),
        }
    }
}

/// Result of reporting a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(usize),
    /// The collection was cleared; the caller logs the error.
    Failed(BackendError),
}

/// Result of reporting a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Success: form closed, caller must refetch the whole collection.
    Refetch,
    /// Failure: alert raised, rows and form untouched.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RecordList<R: ListRecord> {
    records: Vec<R>,
    filter: FilterState,
    page: PageState,
    loading: bool,
    alert: Option<String>,
    form: FormState<R>,
}

impl<R: ListRecord> Default for RecordList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ListRecord> RecordList<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filter: FilterState::default(),
            page: PageState::new(R::KIND.page_size()),
            loading: false,
            alert: None,
            form: FormState::Closed,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Hand the pending alert to the UI, once.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    // =============================================
    // filter input; every change returns to page 1
    // =============================================

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.page.reset();
    }

    pub fn set_dropdown(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filter.dropdowns.insert(field.into(), value.into());
        self.page.reset();
    }

    pub fn set_card(&mut self, key: impl Into<String>) {
        self.filter.card = key.into();
        self.page.reset();
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page.reset();
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.filter.card = TOTAL_CARD.to_string();
        self.page.reset();
    }

    // =============================================
    // paging
    // =============================================

    pub fn page(&self) -> usize {
        self.page.clamped(self.filtered().len())
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        let len = self.filtered().len();
        self.page.page = page;
        self.page.page = self.page.clamped(len);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page().saturating_sub(1));
    }

    // =============================================
    // derived views
    // =============================================

    pub fn filtered(&self) -> Vec<R> {
        apply_filters(&self.records, &self.filter)
    }

    /// Rows on the current page
    pub fn visible(&self) -> Vec<R> {
        let filtered = self.filtered();
        paginate(&filtered, self.page.page, self.page.page_size).to_vec()
    }

    pub fn summary(&self) -> Vec<SummaryCount> {
        summary_counts(&self.records)
    }

    pub fn controls(&self) -> PageControls {
        PageControls::new(self.page.page, self.page.page_size, self.filtered().len())
    }

    pub fn is_empty_view(&self) -> bool {
        self.filtered().is_empty()
    }

    // =============================================
    // fetch lifecycle
    // =============================================

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Store a fetch result. A failed read leaves an empty collection; the
    /// screen then shows its empty state.
    pub fn finish_fetch(&mut self, result: Result<Vec<R>, BackendError>) -> FetchOutcome {
        self.loading = false;
        let outcome = match result {
            Ok(rows) => {
                let n = rows.len();
                self.records = rows;
                FetchOutcome::Loaded(n)
            }
            Err(err) => {
                self.records.clear();
                FetchOutcome::Failed(err)
            }
        };
        let len = self.filtered().len();
        self.page.page = self.page.clamped(len);
        outcome
    }

    // =============================================
    // form & mutations
    // =============================================

    pub fn form(&self) -> &FormState<R> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<R> {
        &mut self.form
    }

    pub fn open_create(&mut self, template: R) {
        self.form = FormState::Create(template);
    }

    /// Open the edit form on a copy of a fetched row. `false` if the id is gone.
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.find(id).cloned() {
            Some(record) => {
                self.form = FormState::Edit(record);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    /// Report a create/update/delete/status result.
    pub fn finish_mutation(&mut self, result: Result<(), BackendError>) -> MutationOutcome {
        match result {
            Ok(()) => {
                self.form = FormState::Closed;
                MutationOutcome::Refetch
            }
            Err(err) => {
                let message = err.user_message();
                self.alert = Some(message.clone());
                MutationOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::PageButton;
    use crate::status::ApprovalStatus;
    use crate::types::LeaveRequest;

    fn leave(id: usize, status: ApprovalStatus) -> LeaveRequest {
        LeaveRequest {
            id: Some(id.to_string()),
            personnel_id: format!("p{}", id),
            leave_type: if id % 2 == 0 { "Sick".into() } else { "Vacation".into() },
            status,
            ..Default::default()
        }
    }

    /// 12 leave requests: 5 Pending, 4 Approved, 3 Rejected
    fn twelve() -> Vec<LeaveRequest> {
        (1..=12)
            .map(|i| {
                let status = match i {
                    1..=5 => ApprovalStatus::Pending,
                    6..=9 => ApprovalStatus::Approved,
                    _ => ApprovalStatus::Rejected,
                };
                leave(i, status)
            })
            .collect()
    }

    fn loaded() -> RecordList<LeaveRequest> {
        let mut list = RecordList::new();
        list.begin_fetch();
        assert!(list.is_loading());
        assert_eq!(list.finish_fetch(Ok(twelve())), FetchOutcome::Loaded(12));
        list
    }

    #[test]
    fn test_pending_card_fits_one_page() {
        let mut list = loaded();
        list.set_card("pending");
        assert_eq!(list.visible().len(), 5);
        let controls = list.controls();
        assert_eq!(controls.total_pages, 1);
        assert!(controls.next_disabled);
        assert!(controls.prev_disabled);
    }

    #[test]
    fn test_empty_collection_disables_everything() {
        let mut list = RecordList::<LeaveRequest>::new();
        list.finish_fetch(Ok(vec![]));
        assert!(list.is_empty_view());
        let controls = list.controls();
        assert!(controls.prev_disabled && controls.next_disabled && controls.buttons_disabled());
        assert_eq!(controls.buttons, vec![PageButton::Page(1)]);
    }

    #[test]
    fn test_unmatched_search_keeps_summary() {
        let mut list = loaded();
        let before = list.summary();
        list.set_search("no record has this text");
        assert!(list.visible().is_empty());
        assert_eq!(list.summary(), before);
        assert_eq!(before[0].count, 12);
    }

    #[test]
    fn test_failed_update_keeps_rows_and_alerts_verbatim() {
        let mut list = loaded();
        list.set_page(2);
        assert!(list.open_edit("7"));
        let rows_before = list.visible();
        let err = BackendError::new("P0001", "Leave overlaps an approved request");
        let outcome = list.finish_mutation(Err(err));
        assert_eq!(outcome, MutationOutcome::Failed("Leave overlaps an approved request".into()));
        assert_eq!(list.visible(), rows_before);
        assert!(list.form().is_open());
        assert_eq!(list.take_alert().as_deref(), Some("Leave overlaps an approved request"));
        assert!(list.alert().is_none());
    }

    #[test]
    fn test_successful_mutation_closes_form_and_asks_refetch() {
        let mut list = loaded();
        list.open_create(LeaveRequest::default());
        assert_eq!(list.finish_mutation(Ok(())), MutationOutcome::Refetch);
        assert!(!list.form().is_open());
        assert!(list.alert().is_none());
    }

    #[test]
    fn test_failed_fetch_clears_collection() {
        let mut list = loaded();
        list.begin_fetch();
        let outcome = list.finish_fetch(Err(BackendError::new("http_503", "unavailable")));
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!list.is_loading());
        assert!(list.records().is_empty());
        assert!(list.alert().is_none());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut list = loaded();
        list.set_page(3);
        assert_eq!(list.page(), 3);
        list.set_dropdown("leave_type", "sick");
        assert_eq!(list.page(), 1);
        list.set_page(2);
        list.set_search("");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_page_clamps_past_end() {
        let mut list = loaded();
        list.set_page(40);
        assert_eq!(list.page(), 3);
        list.next_page();
        assert_eq!(list.page(), 3);
        list.prev_page();
        list.prev_page();
        list.prev_page();
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_refetch_with_fewer_rows_clamps_page() {
        let mut list = loaded();
        list.set_page(3);
        list.finish_fetch(Ok(twelve().into_iter().take(4).collect()));
        assert_eq!(list.page(), 1);
        assert_eq!(list.visible().len(), 4);
    }

    #[test]
    fn test_open_edit_missing_id() {
        let mut list = loaded();
        assert!(!list.open_edit("404"));
        assert!(!list.form().is_open());
    }
}
