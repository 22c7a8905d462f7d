//! Terminal front end: wires stdin, the pure core and the request engine together.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
