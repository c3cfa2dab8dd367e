// Slash command handling for the terminal driver

/// Commands the terminal driver understands alongside chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Toggle,
    Close,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "/help" => Some(Command::Help),
            "/toggle" => Some(Command::Toggle),
            "/close" => Some(Command::Close),
            "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  /help      - Show this help message
  /toggle    - Open or close the chat panel
  /close     - Click away from the panel (closes it when open)
  /quit      - Exit

Anything else is sent to the assistant."#
        .to_string()
}
