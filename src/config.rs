//! Environment configuration
//!
//! Everything is read once at startup. A missing provider key is not an
//! error here: it only disables `/api/ask`.

use crate::reveal::RevealConfig;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-small";
pub const DEFAULT_SITE_TITLE: &str = "Portfolio Website";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Configuration for the completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sent as `X-Title` so the provider dashboard attributes traffic
    pub site_title: String,
    /// `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            site_title: DEFAULT_SITE_TITLE.to_string(),
            timeout: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout = parse_var(&lookup, "PORTFOLIO_PROVIDER_TIMEOUT_SECS", "a number of seconds")?
            .map(Duration::from_secs);

        Ok(Self {
            api_key: lookup("OPENROUTER_API_KEY"),
            base_url: lookup("OPENROUTER_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("PORTFOLIO_MODEL").unwrap_or(defaults.model),
            site_title: lookup("PORTFOLIO_SITE_TITLE").unwrap_or(defaults.site_title),
            timeout,
        })
    }
}

/// Server process configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Built UI to serve for any route the API does not claim
    pub static_dir: Option<PathBuf>,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var(&lookup, "PORTFOLIO_PORT", "a port number")?.unwrap_or(DEFAULT_PORT),
            static_dir: lookup("PORTFOLIO_STATIC_DIR").map(PathBuf::from),
            llm: LlmConfig::from_lookup(&lookup)?,
        })
    }
}

/// Terminal client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub reveal: RevealConfig,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = RevealConfig::default();
        let chunk_size = parse_var::<NonZeroUsize>(
            &lookup,
            "PORTFOLIO_REVEAL_CHUNK",
            "a positive number of characters",
        )?
        .unwrap_or(defaults.chunk_size);
        let interval =
            parse_var::<u64>(&lookup, "PORTFOLIO_REVEAL_INTERVAL_MS", "a number of milliseconds")?
                .map_or(defaults.interval, Duration::from_millis);

        Ok(Self {
            server_url: lookup("PORTFOLIO_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            reveal: RevealConfig {
                chunk_size,
                interval,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::Invalid {
                var,
                expected,
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.static_dir.is_none());
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert!(config.llm.timeout.is_none());
    }

    #[test]
    fn test_server_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORTFOLIO_PORT", "8080"),
            ("PORTFOLIO_STATIC_DIR", "ui/dist"),
            ("OPENROUTER_API_KEY", "sk-test"),
            ("PORTFOLIO_MODEL", "openai/gpt-4o-mini"),
            ("PORTFOLIO_PROVIDER_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, Some(PathBuf::from("ui/dist")));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.llm.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORTFOLIO_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORTFOLIO_PORT"));
    }

    #[test]
    fn test_client_reveal_settings() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("PORTFOLIO_REVEAL_CHUNK", "3"),
            ("PORTFOLIO_REVEAL_INTERVAL_MS", "50"),
        ]))
        .unwrap();
        assert_eq!(config.reveal.chunk_size.get(), 3);
        assert_eq!(config.reveal.interval, Duration::from_millis(50));
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_zero_interval_means_no_wait() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("PORTFOLIO_REVEAL_INTERVAL_MS", "0")]))
                .unwrap();
        assert_eq!(config.reveal.interval, Duration::ZERO);
    }

    #[test]
    fn test_zero_chunk_is_rejected() {
        let err =
            ClientConfig::from_lookup(lookup_from(&[("PORTFOLIO_REVEAL_CHUNK", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "PORTFOLIO_REVEAL_CHUNK",
                ..
            }
        ));
    }
}
