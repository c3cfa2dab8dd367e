// Configuration loader
// Loads the API key from ~/.waychat/config.toml or the environment

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::settings::Config;

/// Load configuration from the WayChat config file or environment.
pub fn load_config() -> Result<Config> {
    if let Some(home) = dirs::home_dir() {
        let path = home.join(".waychat/config.toml");
        if path.exists() {
            return load_from_file(&path);
        }
    }

    for var in ["WAYCHAT_API_KEY", "OPENAI_API_KEY"] {
        if let Ok(api_key) = std::env::var(var) {
            if !api_key.is_empty() {
                return Ok(Config::with_api_key(api_key));
            }
        }
    }

    bail!(
        "No configuration found. Create ~/.waychat/config.toml:\n\n\
         api_key = \"sk-...\"\n\
         model = \"gpt-4o\"            # optional\n\
         temperature = 0.8            # optional\n\n\
         Alternatively, set an environment variable:\n\
         export WAYCHAT_API_KEY=\"sk-...\""
    );
}

/// Load configuration from a specific TOML file.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> Result<Config> {
    #[derive(serde::Deserialize)]
    struct TomlConfig {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_completion_tokens: Option<u32>,
        #[serde(default)]
        request_timeout_secs: Option<u64>,
        #[serde(default)]
        persona: Option<String>,
    }

    let parsed: TomlConfig = toml::from_str(contents).context("Failed to parse config TOML")?;

    let mut config = Config::with_api_key(parsed.api_key);
    if let Some(base_url) = parsed.base_url {
        config.base_url = base_url;
    }
    if let Some(model) = parsed.model {
        config.model = model;
    }
    if let Some(temperature) = parsed.temperature {
        config.temperature = Some(temperature);
    }
    if let Some(max_completion_tokens) = parsed.max_completion_tokens {
        config.max_completion_tokens = Some(max_completion_tokens);
    }
    if let Some(request_timeout_secs) = parsed.request_timeout_secs {
        config.request_timeout_secs = request_timeout_secs;
    }
    if let Some(persona) = parsed.persona {
        config.persona = persona;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(r#"api_key = "sk-test""#).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.persona, "waychat");
    }

    #[test]
    fn overrides_are_applied() {
        let config = parse_config(
            r#"
            api_key = "sk-test"
            model = "gpt-4o-mini"
            temperature = 0.2
            max_completion_tokens = 512
            request_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_completion_tokens, Some(512));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        assert!(parse_config(r#"model = "gpt-4o""#).is_err());
    }

    #[test]
    fn invalid_values_fail_validation() {
        assert!(parse_config(r#"api_key = """#).is_err());
        assert!(parse_config("api_key = \"sk-test\"\nrequest_timeout_secs = 0").is_err());
    }
}
