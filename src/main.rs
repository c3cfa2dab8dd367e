// WayChat terminal driver
// Main entry point: wires config, client, runtime, and a minimal ANSI sink

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use waychat::chat::{format_help, ChatRuntime, Command, RenderPayload, RuntimeEvent, UiEvent, UiSignal};
use waychat::completion::{CompletionClient, Role};
use waychat::config::{load_config, load_from_file, Persona};
use waychat::structure::{Block, Document, InlineSpan, Line, Structurer};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";

#[derive(Parser)]
#[command(name = "waychat", version, about = "Waymark's creative assistant, in the terminal")]
struct Args {
    /// Path to a config file (defaults to ~/.waychat/config.toml, then env)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the configured model
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_from_file(path)?,
        None => load_config()?,
    };
    if let Some(model) = args.model {
        config.model = model;
    }

    let persona = Persona::load_builtin(&config.persona)?;
    let client = Arc::new(CompletionClient::new(&config)?);

    let (signal_tx, signal_rx) = tokio::sync::mpsc::unbounded_channel();
    let runtime = ChatRuntime::new(persona.system_prompt, Structurer::default(), client, signal_tx);
    let events = runtime.handle();

    println!("WayChat - type /help for commands");

    // the terminal stands in for the page: opening the panel is the first click
    events.send(RuntimeEvent::Ui(UiEvent::ToggleClicked)).ok();

    let painter = tokio::spawn(paint_signals(signal_rx));
    std::thread::spawn(move || read_input(events));

    runtime.run().await;
    let _ = painter.await;
    Ok(())
}

/// Blocking stdin loop: slash commands drive the panel, anything else is a
/// submission.
fn read_input(events: UnboundedSender<RuntimeEvent>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let event = match Command::parse(&line) {
            Some(Command::Help) => {
                println!("{}", format_help());
                continue;
            }
            Some(Command::Toggle) => RuntimeEvent::Ui(UiEvent::ToggleClicked),
            Some(Command::Close) => RuntimeEvent::Ui(UiEvent::OutsideClicked),
            Some(Command::Quit) => RuntimeEvent::Shutdown,
            None => RuntimeEvent::Ui(UiEvent::EnterPressed { text: line.clone() }),
        };
        let quitting = matches!(event, RuntimeEvent::Shutdown);
        if events.send(event).is_err() || quitting {
            return;
        }
    }
    // stdin closed: stop the pump as well
    let _ = events.send(RuntimeEvent::Shutdown);
}

/// Paint controller signals as they arrive. This is the renderer
/// collaborator, kept deliberately thin.
async fn paint_signals(mut signals: UnboundedReceiver<UiSignal>) {
    while let Some(signal) = signals.recv().await {
        match signal {
            UiSignal::PanelStateChanged(state) => {
                println!("{GRAY}[panel {state:?}]{RESET}");
            }
            UiSignal::PendingChanged(true) => {
                println!("{DIM}Thinking...{RESET}");
            }
            UiSignal::PendingChanged(false) => {}
            UiSignal::MessageAppended { role: Role::User, payload } => {
                if let RenderPayload::Raw(text) = payload {
                    println!("{DIM}you › {text}{RESET}");
                }
            }
            UiSignal::MessageAppended { payload, .. } => match payload {
                RenderPayload::Structured(document) => paint_document(&document),
                RenderPayload::Raw(text) => println!("{text}"),
            },
        }
    }
}

fn paint_document(document: &Document) {
    for block in &document.blocks {
        match block {
            Block::Paragraph { lines } => {
                for line in lines {
                    println!("  {}", paint_line(line));
                }
                println!();
            }
            Block::Header { text } => {
                println!("  {BOLD}{CYAN}{text}{RESET}");
            }
            Block::OrderedItem { number, spans } => {
                println!("  {CYAN}{number}.{RESET} {}", paint_line(spans));
            }
            Block::BulletList { items } => {
                for item in items {
                    let mut lines = item.lines.iter();
                    if let Some(first) = lines.next() {
                        println!("  {CYAN}•{RESET} {}", paint_line(first));
                    }
                    for continuation in lines {
                        println!("    {}", paint_line(continuation));
                    }
                }
                println!();
            }
        }
    }
}

fn paint_line(line: &Line) -> String {
    let mut out = String::new();
    for span in &line.spans {
        match span {
            InlineSpan::Text(text) => out.push_str(text),
            InlineSpan::Bold(text) => {
                out.push_str(BOLD);
                out.push_str(text);
                out.push_str(RESET);
            }
            InlineSpan::Label(text) => {
                out.push_str(BOLD);
                out.push_str(CYAN);
                out.push_str(text);
                out.push_str(RESET);
            }
        }
    }
    out
}
