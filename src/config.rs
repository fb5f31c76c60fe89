//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binaries (`dotenv::dotenv()`).

use crate::error::AssistantError;
use crate::models::{Credential, Mode};
use crate::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PORT: u16 = 8080;

/// Settings for the chat-completions transport
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model: String,
    /// `None` leaves requests without a timeout
    pub timeout: Option<Duration>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub credential: Option<Credential>,
    pub remote: RemoteConfig,
    pub port: u16,
}

impl AssistantConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup("OPENAI_API_KEY").and_then(Credential::new);

        let base_url = lookup("OPENAI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = lookup("OPENAI_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AssistantError::Config(format!("OPENAI_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AssistantError::Config(format!("invalid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            credential,
            remote: RemoteConfig {
                base_url,
                model,
                timeout,
            },
            port,
        })
    }

    pub fn mode(&self) -> Mode {
        Mode::from_credential(self.credential.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::from_lookup(lookup_from(&[])).unwrap();

        assert!(config.credential.is_none());
        assert_eq!(config.mode(), Mode::AiDisabled);
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.remote.model, DEFAULT_MODEL);
        assert!(config.remote.timeout.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_overrides() {
        let config = AssistantConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("OPENAI_MODEL", "llama3"),
            ("OPENAI_TIMEOUT_SECS", "15"),
            ("API_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.mode(), Mode::AiEnabled);
        assert_eq!(config.remote.base_url, "http://localhost:11434/v1");
        assert_eq!(config.remote.model, "llama3");
        assert_eq!(config.remote.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_blank_api_key_disables_ai() {
        let config =
            AssistantConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert_eq!(config.mode(), Mode::AiDisabled);
    }

    #[test]
    fn test_invalid_values() {
        let err = AssistantConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("invalid port"));

        let err = AssistantConfig::from_lookup(lookup_from(&[("OPENAI_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AssistantError::Config(_)));
    }
}
