// Configuration structs

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_PERSONA: &str = "waychat";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the completions endpoint. Forwarded as a
    /// header value only; never logged.
    pub api_key: String,

    /// Endpoint base, e.g. "https://api.openai.com/v1".
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Sampling temperature; omitted from the request when `None`.
    pub temperature: Option<f32>,

    /// Reply length cap; omitted from the request when `None`.
    pub max_completion_tokens: Option<u32>,

    /// Bound on each outbound call; expiry surfaces as a transport failure.
    pub request_timeout_secs: u64,

    /// Name of the persona whose preamble seeds the transcript.
    pub persona: String,
}

impl Config {
    /// Defaults around a key: creative sampling, short replies.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.8),
            max_completion_tokens: Some(300),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key must not be empty");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("model must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::with_api_key("sk-test".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, Some(0.8));
        assert_eq!(config.max_completion_tokens, Some(300));
    }

    #[test]
    fn empty_key_fails_validation() {
        let config = Config::with_api_key("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = Config::with_api_key("sk-test".to_string());
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
