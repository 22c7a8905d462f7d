use crate::view_model::{
    AppViewModel, CompareBody, CompareView, ComparisonRowView, FeedbackView, ResultRowView,
    SearchBody, SearchView, COMPARE_LOADING_TEXT, EMPTY_TERM_MESSAGE, FETCH_FAILED_MESSAGE,
    NO_COMPARISONS_TEXT, NO_MATCHES_TEXT, NO_RESULTS_YET_TEXT,
};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Search,
    Compare,
    Feedback,
}

/// A priced grocery item as shown by the search view.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub name: String,
    /// `None` when the price is unknown or unavailable.
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub name: String,
    pub your_price: Option<f64>,
    pub kroger_price: Option<f64>,
}

/// Status of the most recent search request, derived from the stored fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct SearchState {
    query: String,
    items: Vec<ResultItem>,
    loading: bool,
    error: Option<String>,
    completed: bool,
}

impl SearchState {
    fn request_state(&self) -> RequestState {
        if self.loading {
            RequestState::Loading
        } else if let Some(message) = &self.error {
            RequestState::Failed(message.clone())
        } else if self.completed {
            RequestState::Succeeded
        } else {
            RequestState::Idle
        }
    }

    fn body(&self) -> SearchBody {
        if self.loading {
            SearchBody::Searching
        } else if !self.items.is_empty() {
            SearchBody::Results(self.items.iter().map(ResultRowView::from_item).collect())
        } else if self.completed {
            SearchBody::Placeholder(NO_MATCHES_TEXT.to_string())
        } else {
            SearchBody::Placeholder(NO_RESULTS_YET_TEXT.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct CompareState {
    rows: Vec<ComparisonRow>,
    loading: bool,
    error: Option<String>,
}

impl CompareState {
    fn body(&self) -> CompareBody {
        if self.loading {
            CompareBody::Loading(COMPARE_LOADING_TEXT.to_string())
        } else if self.rows.is_empty() {
            CompareBody::Placeholder(NO_COMPARISONS_TEXT.to_string())
        } else {
            CompareBody::Rows(self.rows.iter().map(ComparisonRowView::from_row).collect())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct FeedbackState {
    draft: String,
    submitted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    page: Page,
    search: SearchState,
    compare: CompareState,
    feedback: FeedbackState,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::default(),
            search: SearchState::default(),
            compare: CompareState::default(),
            feedback: FeedbackState::default(),
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.search.items
    }

    pub fn is_loading(&self) -> bool {
        self.search.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.search.error.as_deref()
    }

    pub fn request_state(&self) -> RequestState {
        self.search.request_state()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.page,
            search: SearchView {
                query: self.search.query.clone(),
                request: self.search.request_state(),
                error: self.search.error.clone(),
                body: self.search.body(),
            },
            compare: CompareView {
                error: self.compare.error.clone(),
                body: self.compare.body(),
            },
            feedback: FeedbackView {
                draft: self.feedback.draft.clone(),
                submitted: self.feedback.submitted,
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Switches page. Returns true when the page actually changed.
    pub(crate) fn navigate(&mut self, page: Page) -> bool {
        if self.page == page {
            return false;
        }
        self.page = page;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_query(&mut self, text: String) {
        self.search.query = text;
        self.mark_dirty();
    }

    /// Validates the query and, when it is non-empty, enters the loading state.
    ///
    /// Whitespace-only queries are accepted as-is.
    pub(crate) fn begin_search(&mut self) -> Option<(RequestId, String)> {
        self.mark_dirty();
        if self.search.query.is_empty() {
            self.search.error = Some(EMPTY_TERM_MESSAGE.to_string());
            return None;
        }
        self.search.error = None;
        self.search.loading = true;
        Some((self.allocate_request_id(), self.search.query.clone()))
    }

    pub(crate) fn apply_search_items(&mut self, items: Vec<ResultItem>) {
        self.search.items = items;
        self.search.error = None;
        self.search.completed = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_search_failure(&mut self) {
        self.search.error = Some(FETCH_FAILED_MESSAGE.to_string());
        self.search.completed = true;
        self.mark_dirty();
    }

    /// Runs after either outcome of a search has been applied.
    pub(crate) fn finish_search(&mut self) {
        self.search.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn begin_comparison(&mut self) -> RequestId {
        self.compare.error = None;
        self.compare.loading = true;
        self.mark_dirty();
        self.allocate_request_id()
    }

    pub(crate) fn apply_comparison_rows(&mut self, rows: Vec<ComparisonRow>) {
        self.compare.rows = rows;
        self.compare.error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_comparison_failure(&mut self) {
        self.compare.error = Some(FETCH_FAILED_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn finish_comparison(&mut self) {
        self.compare.loading = false;
        self.mark_dirty();
    }

    pub(crate) fn set_feedback_draft(&mut self, text: String) {
        self.feedback.draft = text;
        self.mark_dirty();
    }

    /// Returns false when the draft is empty and nothing was submitted.
    pub(crate) fn submit_feedback(&mut self) -> bool {
        if self.feedback.draft.is_empty() {
            return false;
        }
        self.feedback.draft.clear();
        self.feedback.submitted = true;
        self.mark_dirty();
        true
    }
}
