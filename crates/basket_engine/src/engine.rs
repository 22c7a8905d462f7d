use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use basket_logging::{basket_debug, basket_info, basket_warn};

use crate::gateway::{GatewaySettings, PriceGateway, ReqwestGateway};
use crate::{EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Search { request_id: RequestId, term: String },
    Comparison { request_id: RequestId },
}

/// Runs gateway requests on a background tokio runtime and reports completions.
///
/// Requests are never de-duplicated or cancelled: each one runs to completion and
/// produces exactly one [`EngineEvent`], in whatever order the server answers.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: GatewaySettings) -> Result<Self, EngineError> {
        let gateway = ReqwestGateway::new(settings)?;
        Self::with_gateway(Arc::new(gateway))
    }

    pub fn with_gateway(gateway: Arc<dyn PriceGateway>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, event_tx).await;
                });
            }
            basket_info!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn search(&self, request_id: RequestId, term: impl Into<String>) {
        let command = EngineCommand::Search {
            request_id,
            term: term.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            basket_warn!("Search {} dropped: engine thread is gone", request_id);
        }
    }

    pub fn fetch_comparison(&self, request_id: RequestId) {
        let command = EngineCommand::Comparison { request_id };
        if self.cmd_tx.send(command).is_err() {
            basket_warn!("Comparison {} dropped: engine thread is gone", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    gateway: &dyn PriceGateway,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Search { request_id, term } => {
            basket_debug!("Search {} started term_len={}", request_id, term.len());
            let result = gateway.search(&term).await;
            EngineEvent::SearchCompleted { request_id, result }
        }
        EngineCommand::Comparison { request_id } => {
            basket_debug!("Comparison {} started", request_id);
            let result = gateway.comparison().await;
            EngineEvent::ComparisonCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}
