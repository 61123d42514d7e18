//! LLM provider abstraction
//!
//! The ask proxy talks to exactly one hosted completion provider. The trait
//! keeps the HTTP client swappable so handlers can be tested with a mock.

mod error;
mod openrouter;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openrouter::OpenRouterService;
pub use types::*;

use crate::config::LlmConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Build the configured provider, wrapped with logging.
///
/// Returns `Ok(None)` when no API key is configured; the rest of the service
/// keeps running and only `/api/ask` fails.
pub fn build_service(config: &LlmConfig) -> Result<Option<Arc<dyn LlmService>>, LlmError> {
    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Ok(None);
    };

    let service = OpenRouterService::new(api_key, config)?;
    Ok(Some(Arc::new(LoggingService::new(Arc::new(service)))))
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    empty = response.text.is_none(),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    status = ?e.status,
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_api_key_no_service() {
        let config = LlmConfig::default();
        assert!(build_service(&config).unwrap().is_none());
    }

    #[test]
    fn test_empty_api_key_no_service() {
        let config = LlmConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(build_service(&config).unwrap().is_none());
    }

    #[test]
    fn test_api_key_builds_logged_service() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let service = build_service(&config).unwrap().unwrap();
        assert_eq!(service.model_id(), config.model);
    }
}
