//! API request and response types
//!
//! Shared by the server handlers and the HTTP ask client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/ask`.
///
/// `question` is kept loose so a wrong type is reported as a 400 with a
/// message rather than a generic extractor rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<Value>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(Value::String(question.into())),
        }
    }

    /// The question, if it is present and a string
    pub fn question_str(&self) -> Option<&str> {
        self.question.as_ref().and_then(Value::as_str)
    }
}

/// Successful answer
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Static site copy for the page
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    pub welcome: String,
    pub suggestions: Vec<String>,
    pub intro_markdown: String,
    pub intro_html: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
