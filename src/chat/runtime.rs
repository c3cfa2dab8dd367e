// Event pump wiring the session controller to a completion backend
//
// One event at a time: UI events and completion outcomes share a single
// queue, so controller state never sees interleaved mutation. The outbound
// call is the only suspension point and runs in its own task.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::completion::{CompletionBackend, CompletionError};
use crate::structure::Structurer;

use super::events::{UiEvent, UiSignal};
use super::session::{PendingRequest, SessionController};

/// Events flowing through the runtime pump.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// An event from the UI layer.
    Ui(UiEvent),
    /// Outcome of an in-flight completion request.
    Completion {
        token: Uuid,
        outcome: Result<String, CompletionError>,
    },
    /// Stop the pump.
    Shutdown,
}

pub struct ChatRuntime {
    controller: SessionController,
    backend: Arc<dyn CompletionBackend>,
    event_tx: UnboundedSender<RuntimeEvent>,
    event_rx: UnboundedReceiver<RuntimeEvent>,
}

impl ChatRuntime {
    pub fn new(
        persona_preamble: impl Into<String>,
        structurer: Structurer,
        backend: Arc<dyn CompletionBackend>,
        signals: UnboundedSender<UiSignal>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            controller: SessionController::new(persona_preamble, structurer, signals),
            backend,
            event_tx,
            event_rx,
        }
    }

    /// Sender for the UI side to post events from other tasks.
    pub fn handle(&self) -> UnboundedSender<RuntimeEvent> {
        self.event_tx.clone()
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Drive events until a shutdown arrives or every sender is gone.
    pub async fn run(mut self) {
        while let Some(event) = self.event_rx.recv().await {
            match event {
                RuntimeEvent::Ui(event) => {
                    if let Some(request) = self.controller.handle_event(event) {
                        self.dispatch(request);
                    }
                }
                RuntimeEvent::Completion { token, outcome } => {
                    self.controller.resolve(token, outcome);
                }
                RuntimeEvent::Shutdown => break,
            }
        }
    }

    /// Run the backend call off the pump; its outcome re-enters as an event.
    fn dispatch(&self, request: PendingRequest) {
        let backend = Arc::clone(&self.backend);
        let events = self.event_tx.clone();
        tokio::spawn(async move {
            tracing::debug!(
                backend = backend.name(),
                token = %request.token,
                messages = request.payload.len(),
                "dispatching completion request"
            );
            let outcome = backend.complete(request.payload).await;
            // the pump may have shut down in the meantime
            let _ = events.send(RuntimeEvent::Completion {
                token: request.token,
                outcome,
            });
        });
    }
}
