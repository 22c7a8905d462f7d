#![deny(missing_docs)]
//! Logging front door for the market basket crates.
//!
//! Library code logs through the `basket_*` macros, which forward to the `log`
//! facade; the binary decides where records go. Integration tests install a
//! terminal sink with [`initialize_for_tests`].

/// Per-chunk and per-call noise; off in every shipped configuration.
#[macro_export]
macro_rules! basket_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Lifecycle events such as start-up, shutdown and issued requests.
#[macro_export]
macro_rules! basket_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Request details: URLs, result counts, request ids.
#[macro_export]
macro_rules! basket_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Recoverable failures, e.g. a search that could not be fetched.
#[macro_export]
macro_rules! basket_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Failures the user cannot recover from by retrying.
#[macro_export]
macro_rules! basket_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Routes log records to the terminal for the current test binary.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A second init returns an error once a logger is installed.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
