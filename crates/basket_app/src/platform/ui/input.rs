use basket_core::{Msg, Page};

/// What one line typed at the prompt asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  :home :search :compare :feedback   switch page
  :go                                resubmit the current search
  :help                              show this help
  :quit                              exit
On the search page, any other line is the search term.
On the feedback page, any other line is submitted as feedback.";

/// Maps a line of input to core messages. The line is used verbatim apart from
/// its line terminator, so leading or trailing spaces stay part of a search term.
pub fn parse_line(page: Page, raw: &str) -> Command {
    let line = raw.trim_end_matches(['\n', '\r']);

    if let Some(command) = line.trim().strip_prefix(':') {
        return match command {
            "home" => Command::Dispatch(vec![Msg::Navigate(Page::Home)]),
            "search" => Command::Dispatch(vec![Msg::Navigate(Page::Search)]),
            "compare" => Command::Dispatch(vec![Msg::Navigate(Page::Compare)]),
            "feedback" => Command::Dispatch(vec![Msg::Navigate(Page::Feedback)]),
            "go" if page == Page::Search => Command::Dispatch(vec![Msg::SearchSubmitted]),
            "quit" | "q" => Command::Quit,
            _ => Command::Help,
        };
    }

    match page {
        Page::Search => Command::Dispatch(vec![
            Msg::QueryChanged(line.to_string()),
            Msg::SearchSubmitted,
        ]),
        Page::Feedback => Command::Dispatch(vec![
            Msg::FeedbackChanged(line.to_string()),
            Msg::FeedbackSubmitted,
        ]),
        Page::Home | Page::Compare => Command::Dispatch(vec![Msg::NoOp]),
    }
}
