use basket_logging::{basket_debug, basket_warn};

use crate::{AppState, Effect, Msg, Page};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(page) => {
            if state.navigate(page) && page == Page::Compare {
                let request_id = state.begin_comparison();
                vec![Effect::FetchComparison { request_id }]
            } else {
                Vec::new()
            }
        }
        Msg::QueryChanged(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::SearchSubmitted => match state.begin_search() {
            Some((request_id, term)) => vec![Effect::SearchPrices { request_id, term }],
            None => Vec::new(),
        },
        Msg::SearchCompleted { request_id, result } => {
            // No ordering check: whichever request resolves last wins.
            match result {
                Ok(items) => {
                    basket_debug!("Search {} returned {} items", request_id, items.len());
                    state.apply_search_items(items);
                }
                Err(detail) => {
                    basket_warn!("Search {} failed: {}", request_id, detail);
                    state.apply_search_failure();
                }
            }
            state.finish_search();
            Vec::new()
        }
        Msg::ComparisonCompleted { request_id, result } => {
            match result {
                Ok(rows) => {
                    basket_debug!("Comparison {} returned {} rows", request_id, rows.len());
                    state.apply_comparison_rows(rows);
                }
                Err(detail) => {
                    basket_warn!("Comparison {} failed: {}", request_id, detail);
                    state.apply_comparison_failure();
                }
            }
            state.finish_comparison();
            Vec::new()
        }
        Msg::FeedbackChanged(text) => {
            state.set_feedback_draft(text);
            Vec::new()
        }
        Msg::FeedbackSubmitted => {
            if !state.submit_feedback() {
                basket_debug!("Ignoring empty feedback submission");
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
