use crate::{ComparisonRow, Page, RequestId, ResultItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched to another page.
    Navigate(Page),
    /// User edited the search box.
    QueryChanged(String),
    /// User pressed Enter or clicked Search.
    SearchSubmitted,
    /// Gateway resolution for a search request. The error carries diagnostic detail only.
    SearchCompleted {
        request_id: RequestId,
        result: Result<Vec<ResultItem>, String>,
    },
    /// Gateway resolution for the comparison table.
    ComparisonCompleted {
        request_id: RequestId,
        result: Result<Vec<ComparisonRow>, String>,
    },
    /// User edited the feedback draft.
    FeedbackChanged(String),
    /// User clicked Submit on the feedback form.
    FeedbackSubmitted,
    /// Fallback for input that maps to nothing.
    NoOp,
}
