use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use basket_core::{ComparisonRow, Effect, Msg, ResultItem};
use basket_engine::{EngineError, EngineEvent, EngineHandle, GatewaySettings, ItemPrice};
use basket_logging::basket_info;

use super::app::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SearchPrices { request_id, term } => {
                    basket_info!(
                        "SearchPrices request_id={} term_len={} term={:?}",
                        request_id,
                        term.len(),
                        term
                    );
                    self.engine.search(request_id, term);
                }
                Effect::FetchComparison { request_id } => {
                    basket_info!("FetchComparison request_id={}", request_id);
                    self.engine.fetch_comparison(request_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(POLL_INTERVAL) else {
                continue;
            };
            if event_tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result
                .map(|items| items.into_iter().map(to_result_item).collect())
                .map_err(|err| err.to_string()),
        },
        EngineEvent::ComparisonCompleted { request_id, result } => Msg::ComparisonCompleted {
            request_id,
            result: result
                .map(|items| items.into_iter().map(to_comparison_row).collect())
                .map_err(|err| err.to_string()),
        },
    }
}

fn to_result_item(item: ItemPrice) -> ResultItem {
    ResultItem {
        name: item.name,
        price: item.kroger_price,
    }
}

fn to_comparison_row(item: ItemPrice) -> ComparisonRow {
    ComparisonRow {
        name: item.name,
        your_price: item.your_price,
        kroger_price: item.kroger_price,
    }
}
