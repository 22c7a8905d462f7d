//! Market basket core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, ComparisonRow, Page, RequestId, RequestState, ResultItem};
pub use update::update;
pub use view_model::{
    price_label, AppViewModel, CompareBody, CompareView, ComparisonRowView, FeedbackView,
    ResultRowView, SearchBody, SearchView, COMPARE_LOADING_TEXT, EMPTY_TERM_MESSAGE,
    FEEDBACK_THANKS, FETCH_FAILED_MESSAGE, HOME_TAGLINE, HOME_TITLE, NO_COMPARISONS_TEXT,
    NO_MATCHES_TEXT, NO_RESULTS_YET_TEXT, SEARCHING_TEXT,
};
