//! `OpenRouter` provider (`OpenAI`-compatible chat completions)

use super::types::{LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat-completions client for `OpenRouter` or any `OpenAI`-compatible endpoint
pub struct OpenRouterService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    site_title: String,
}

impl OpenRouterService {
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            site_title: config.site_title.clone(),
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if !request.system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(request.system.clone()),
            });
        }

        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.as_str().to_string(),
            content: Some(m.text.clone()),
        }));

        ChatRequest {
            model: self.model.clone(),
            messages,
        }
    }

    /// Take the first choice's text. No choices, or empty content, is not an
    /// error: the caller substitutes a placeholder.
    fn normalize_response(resp: ChatResponse) -> LlmResponse {
        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.is_empty());

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        LlmResponse { text, usage }
    }
}

#[async_trait]
impl LlmService for OpenRouterService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let chat_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", &self.site_title)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            // Keep the raw body: it is relayed as `details` and logged
            return Err(LlmError::from_status(status.as_u16(), body));
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| parse_failure(&e, &body))?;

        Ok(Self::normalize_response(chat_response))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Longest body excerpt kept in a parse error
const BODY_EXCERPT_CHARS: usize = 200;

fn parse_failure(err: &serde_json::Error, body: &str) -> LlmError {
    tracing::warn!(body_len = body.len(), error = %err, "Undecodable provider response");
    let excerpt = match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", body.get(..idx).unwrap_or_default()),
        None => body.to_string(),
    };
    LlmError::unknown(format!("Failed to parse response: {err} - body: {excerpt}"))
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
