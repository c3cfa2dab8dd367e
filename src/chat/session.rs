// Session controller: submit/reply lifecycle and panel visibility
//
// All session state lives here and is mutated one event at a time. The
// controller never performs I/O itself: an accepted submission comes back
// as a PendingRequest for the runtime to dispatch, and the outcome re-enters
// through resolve().

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::completion::{ChatMessage, CompletionError, Role};
use crate::structure::Structurer;

use super::conversation::ConversationHistory;
use super::events::{RenderPayload, UiEvent, UiSignal};

/// Fallback assistant text when the endpoint answers without a usable reply.
pub const FALLBACK_MALFORMED: &str = "Sorry, I could not understand the response.";

/// Fallback assistant text when the request cannot be completed at all.
pub const FALLBACK_TRANSPORT: &str = "Error: Could not reach the chat service.";

/// Request lifecycle state. Owned solely by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
    Errored(String),
}

/// Panel visibility, independent of the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// An accepted submission: the token identifying the in-flight request and
/// the transcript snapshot taken at submit time.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub token: Uuid,
    pub payload: Vec<ChatMessage>,
}

pub struct SessionController {
    history: ConversationHistory,
    structurer: Structurer,
    state: SessionState,
    panel: PanelState,
    input: String,
    in_flight: Option<Uuid>,
    last_error: Option<String>,
    signals: UnboundedSender<UiSignal>,
}

impl SessionController {
    pub fn new(
        persona_preamble: impl Into<String>,
        structurer: Structurer,
        signals: UnboundedSender<UiSignal>,
    ) -> Self {
        Self {
            history: ConversationHistory::new(persona_preamble),
            structurer,
            state: SessionState::Idle,
            panel: PanelState::Closed,
            input: String::new(),
            in_flight: None,
            last_error: None,
            signals,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Reason recorded by the most recent transport failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Feed one UI event. A submission that passes the guards comes back as
    /// a request for the runtime to dispatch.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<PendingRequest> {
        match event {
            UiEvent::ToggleClicked => {
                self.set_panel(match self.panel {
                    PanelState::Closed => PanelState::Open,
                    PanelState::Open => PanelState::Closed,
                });
                None
            }
            UiEvent::OutsideClicked => {
                if self.panel == PanelState::Open {
                    self.set_panel(PanelState::Closed);
                }
                None
            }
            UiEvent::InputChanged { text } => {
                self.input = text;
                None
            }
            UiEvent::SendClicked => {
                let text = self.input.clone();
                self.submit_and_clear(&text)
            }
            UiEvent::EnterPressed { text } => self.submit_and_clear(&text),
        }
    }

    /// Accept user text: append to history, signal the renderer, mint the
    /// in-flight token, and hand back the outbound payload. `None` when a
    /// guard suppressed the submission.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring empty submission");
            return None;
        }
        if self.state == SessionState::AwaitingReply {
            tracing::warn!("submission rejected: a request is already in flight");
            return None;
        }

        self.history.append(ChatMessage::user(text));
        self.emit(UiSignal::MessageAppended {
            role: Role::User,
            payload: RenderPayload::Raw(text.to_string()),
        });
        self.emit(UiSignal::PendingChanged(true));

        let token = Uuid::new_v4();
        self.in_flight = Some(token);
        self.state = SessionState::AwaitingReply;
        Some(PendingRequest {
            token,
            payload: self.history.snapshot(),
        })
    }

    /// Deliver the outcome of an in-flight request. Outcomes for unknown or
    /// superseded tokens are dropped.
    pub fn resolve(&mut self, token: Uuid, outcome: Result<String, CompletionError>) {
        if self.in_flight != Some(token) {
            tracing::debug!(%token, "dropping completion for a request no longer in flight");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(raw) => self.finish_turn(raw),
            Err(CompletionError::MalformedReply) => {
                tracing::warn!("reply carried no usable text");
                self.finish_turn(FALLBACK_MALFORMED.to_string());
            }
            Err(CompletionError::Transport(reason)) => {
                tracing::warn!(%reason, "completion request failed");
                self.state = SessionState::Errored(reason.clone());
                self.last_error = Some(reason);
                self.finish_turn(FALLBACK_TRANSPORT.to_string());
            }
        }
    }

    /// Append the assistant turn and return to idle. History stores the raw
    /// text; the document is derived state, re-derivable at any time.
    fn finish_turn(&mut self, raw: String) {
        let document = self.structurer.structure(&raw);
        self.history.append(ChatMessage::assistant(raw));
        self.emit(UiSignal::PendingChanged(false));
        self.emit(UiSignal::MessageAppended {
            role: Role::Assistant,
            payload: RenderPayload::Structured(document),
        });
        self.state = SessionState::Idle;
    }

    fn submit_and_clear(&mut self, text: &str) -> Option<PendingRequest> {
        let pending = self.submit(text);
        if pending.is_some() {
            self.input.clear();
        }
        pending
    }

    fn set_panel(&mut self, panel: PanelState) {
        if self.panel != panel {
            self.panel = panel;
            self.emit(UiSignal::PanelStateChanged(panel));
        }
    }

    fn emit(&self, signal: UiSignal) {
        // the renderer side may already be gone during teardown
        let _ = self.signals.send(signal);
    }
}
