// Chat session module
// History, session controller, UI bridge, and the event pump driving them

mod commands;
mod conversation;
mod events;
mod runtime;
mod session;

pub use commands::{format_help, Command};
pub use conversation::ConversationHistory;
pub use events::{ClickTarget, RenderPayload, UiEvent, UiSignal};
pub use runtime::{ChatRuntime, RuntimeEvent};
pub use session::{
    PanelState, PendingRequest, SessionController, SessionState, FALLBACK_MALFORMED,
    FALLBACK_TRANSPORT,
};
