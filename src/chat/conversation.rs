// Append-only conversation transcript

use crate::completion::ChatMessage;

/// Ordered transcript of one session, seeded with the persona preamble.
///
/// The transcript is the literal outbound payload: every completion call
/// replays all prior turns, preamble included, so the payload only ever
/// grows over a session. Messages are never edited, reordered, or removed
/// while the session is live.
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    /// Start a transcript with the persona system message as message zero.
    pub fn new(persona_preamble: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(persona_preamble)],
        }
    }

    /// Add a message to the end.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Full ordered transcript, used verbatim as the request payload.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    /// Total number of messages, preamble included.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Complete user/assistant exchanges (the preamble does not count).
    pub fn turn_count(&self) -> usize {
        (self.messages.len() - 1) / 2
    }
}
