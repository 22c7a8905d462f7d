use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use basket_core::{update, AppState, Msg};
use basket_logging::{basket_info, basket_warn};

use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_line, Command, HELP_TEXT};
use super::ui::render::render;

/// Everything the UI thread reacts to.
pub enum AppEvent {
    /// A line typed at the prompt.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced off the UI thread (request completions).
    Core(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load(Path::new(CONFIG_FILENAME))?;
    logging::initialize(config.log_destination());
    basket_info!(
        "Starting market basket client base_url={} search_path={}",
        config.base_url,
        config.search_path
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(config.gateway_settings(), event_tx.clone())
        .context("failed to start request engine")?;
    spawn_stdin_reader(event_tx);

    let mut app = App::new(effects);
    app.render_view()?;

    while let Ok(event) = event_rx.recv() {
        let keep_running = match event {
            AppEvent::Line(line) => app.handle_line(&line)?,
            AppEvent::Core(msg) => {
                app.dispatch_msg(msg)?;
                true
            }
            AppEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    basket_info!("Market basket client exiting");
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    basket_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    effects: EffectRunner,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match parse_line(self.state.page(), line) {
            Command::Dispatch(msgs) => {
                let mut dirty = false;
                for msg in msgs {
                    dirty |= self.apply_msg(msg);
                }
                if dirty {
                    self.render_view()?;
                }
                Ok(true)
            }
            Command::Help => {
                write_lines(HELP_TEXT.lines().map(str::to_string))?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        if self.apply_msg(msg) {
            self.render_view()?;
        }
        Ok(())
    }

    /// Runs one message through the core and hands its effects to the engine.
    /// Returns whether the view needs re-rendering.
    fn apply_msg(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.enqueue(effects);
        was_dirty
    }

    fn render_view(&self) -> io::Result<()> {
        write_lines(render(&self.state.view()))
    }
}

fn write_lines(lines: impl IntoIterator<Item = String>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    write!(out, "> ")?;
    out.flush()
}
