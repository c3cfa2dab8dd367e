// UI bridge: inbound events and outbound signals for the session controller

use crate::completion::Role;
use crate::structure::Document;

use super::session::PanelState;

/// Where a raw click landed, as resolved by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The panel toggle control.
    ToggleControl,
    /// Anywhere inside the open panel.
    InsidePanel,
    /// Anywhere else on the page.
    Outside,
}

/// Events the controller accepts from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ToggleClicked,
    OutsideClicked,
    SendClicked,
    EnterPressed { text: String },
    InputChanged { text: String },
}

impl UiEvent {
    /// Map a resolved click to the event it produces, if any. Clicks inside
    /// the panel produce no event, and therefore no transition.
    pub fn from_click(target: ClickTarget) -> Option<Self> {
        match target {
            ClickTarget::ToggleControl => Some(UiEvent::ToggleClicked),
            ClickTarget::Outside => Some(UiEvent::OutsideClicked),
            ClickTarget::InsidePanel => None,
        }
    }
}

/// What an appended message carries to the renderer: user turns stay raw,
/// assistant turns arrive structured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPayload {
    Raw(String),
    Structured(Document),
}

/// Signals the controller emits for the renderer to consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiSignal {
    PanelStateChanged(PanelState),
    PendingChanged(bool),
    MessageAppended { role: Role, payload: RenderPayload },
}
