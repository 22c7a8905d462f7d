use std::fmt;

use crate::{ComparisonRow, Page, RequestState, ResultItem};

pub const HOME_TITLE: &str = "Market Basket";
pub const HOME_TAGLINE: &str = "Track and compare grocery prices across locations.";
pub const EMPTY_TERM_MESSAGE: &str = "Please enter a search term.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data.";
pub const SEARCHING_TEXT: &str = "Searching…";
pub const NO_RESULTS_YET_TEXT: &str = "No results yet. Try another term.";
pub const NO_MATCHES_TEXT: &str = "No matching items found. Try another term.";
pub const COMPARE_LOADING_TEXT: &str = "Loading prices…";
pub const NO_COMPARISONS_TEXT: &str = "No price comparisons available.";
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub page: Page,
    pub search: SearchView,
    pub compare: CompareView,
    pub feedback: FeedbackView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub request: RequestState,
    pub error: Option<String>,
    pub body: SearchBody,
}

/// What occupies the results area of the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBody {
    Searching,
    Results(Vec<ResultRowView>),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub name: String,
    pub price: String,
}

impl ResultRowView {
    pub(crate) fn from_item(item: &ResultItem) -> Self {
        Self {
            name: item.name.clone(),
            price: price_label(item.price),
        }
    }
}

impl fmt::Display for ResultRowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.name, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareView {
    pub error: Option<String>,
    pub body: CompareBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareBody {
    Loading(String),
    Rows(Vec<ComparisonRowView>),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRowView {
    pub name: String,
    pub local: String,
    pub kroger: String,
}

impl ComparisonRowView {
    pub(crate) fn from_row(row: &ComparisonRow) -> Self {
        Self {
            name: row.name.clone(),
            local: price_label(row.your_price),
            kroger: price_label(row.kroger_price),
        }
    }
}

impl fmt::Display for ComparisonRowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — Local: {} | Kroger: {}",
            self.name, self.local, self.kroger
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub draft: String,
    pub submitted: bool,
}

/// `$2.5` for a known price, `N/A` otherwise. Uses the shortest float form, so `3.0` prints as `$3`.
pub fn price_label(price: Option<f64>) -> String {
    match price {
        Some(amount) => format!("${amount}"),
        None => "N/A".to_string(),
    }
}
