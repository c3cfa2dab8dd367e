// Completion backend interface
// The session core depends on this contract, never on the transport itself

use async_trait::async_trait;
use thiserror::Error;

mod client;
mod types;

pub use client::CompletionClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage, Role};

/// How a completion request can fail. Both kinds are non-fatal to the
/// session: the controller turns them into fallback assistant turns.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The call succeeded but the response carried no usable reply text.
    #[error("response contained no usable reply")]
    MalformedReply,

    /// Network failure, timeout, non-2xx status, or an undecodable body.
    #[error("completion request failed: {0}")]
    Transport(String),
}

/// Transport-agnostic completion interface the runtime dispatches to.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Request a completion for the full conversation transcript.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
