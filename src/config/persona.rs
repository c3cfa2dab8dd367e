// Persona system for the assistant's preamble

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A persona defines the system preamble seeded into every session
/// transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Persona name (e.g., "WayChat")
    pub name: String,

    /// Description of this persona
    pub description: String,

    /// System prompt sent as the transcript's first message
    pub system_prompt: String,
}

impl Persona {
    /// Load persona from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read persona from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse persona TOML")
    }

    /// Load built-in persona by name
    pub fn load_builtin(name: &str) -> Result<Self> {
        let template = match name {
            "waychat" => include_str!("../../data/personas/waychat.toml"),
            _ => anyhow::bail!("Unknown builtin persona: {}", name),
        };

        toml::from_str(template)
            .with_context(|| format!("Failed to parse builtin persona: {}", name))
    }

    /// List available builtin personas
    pub fn list_builtins() -> Vec<&'static str> {
        vec!["waychat"]
    }
}
