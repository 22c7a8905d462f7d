use basket_core::{
    AppViewModel, CompareBody, CompareView, FeedbackView, Page, SearchBody, SearchView,
    FEEDBACK_THANKS, HOME_TAGLINE, HOME_TITLE, SEARCHING_TEXT,
};

const RULE: &str = "────────────────────────────────────────";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string(), nav_bar(view.page), String::new()];

    match view.page {
        Page::Home => {
            lines.push(format!("🧺 {HOME_TITLE}"));
            lines.push(HOME_TAGLINE.to_string());
        }
        Page::Search => render_search(&view.search, &mut lines),
        Page::Compare => render_compare(&view.compare, &mut lines),
        Page::Feedback => render_feedback(&view.feedback, &mut lines),
    }

    lines.push(String::new());
    lines.push(hint(view.page).to_string());
    lines
}

fn nav_bar(current: Page) -> String {
    let links = [
        (Page::Home, "Home"),
        (Page::Search, "Search"),
        (Page::Compare, "Compare"),
        (Page::Feedback, "Feedback"),
    ]
    .iter()
    .map(|(page, label)| {
        if *page == current {
            format!("[{label}]")
        } else {
            label.to_string()
        }
    })
    .collect::<Vec<_>>()
    .join("  ");
    format!("{HOME_TITLE} | {links}")
}

fn render_search(search: &SearchView, lines: &mut Vec<String>) {
    lines.push("Search Items".to_string());
    lines.push(format!("Query: {:?}", search.query));
    if let Some(error) = &search.error {
        lines.push(format!("! {error}"));
    }
    match &search.body {
        SearchBody::Searching => lines.push(SEARCHING_TEXT.to_string()),
        SearchBody::Results(rows) => lines.extend(rows.iter().map(|row| format!("  • {row}"))),
        SearchBody::Placeholder(text) => lines.push(text.clone()),
    }
}

fn render_compare(compare: &CompareView, lines: &mut Vec<String>) {
    lines.push("Compare Grocery Prices".to_string());
    if let Some(error) = &compare.error {
        lines.push(format!("! {error}"));
    }
    match &compare.body {
        CompareBody::Loading(text) | CompareBody::Placeholder(text) => lines.push(text.clone()),
        CompareBody::Rows(rows) => lines.extend(rows.iter().map(|row| format!("  • {row}"))),
    }
}

fn render_feedback(feedback: &FeedbackView, lines: &mut Vec<String>) {
    lines.push("Submit Feedback".to_string());
    if feedback.submitted {
        lines.push(format!("✅ {FEEDBACK_THANKS}"));
    }
}

fn hint(page: Page) -> &'static str {
    match page {
        Page::Search => "Type an item and press Enter to search (:help for commands).",
        Page::Feedback => "Type your feedback and press Enter to submit (:help for commands).",
        Page::Home | Page::Compare => ":search :compare :feedback :quit (:help for commands)",
    }
}
