//! Mock implementations for testing
//!
//! These mocks let the runtime run without a server.

use super::traits::AskClient;
use crate::chat::CompletionResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct MockInner {
    results: Mutex<VecDeque<CompletionResult>>,
    questions: Mutex<Vec<String>>,
}

/// Mock ask client that returns queued results. Clones share the queue.
#[derive(Clone, Default)]
pub struct MockAskClient {
    inner: Arc<MockInner>,
    delay: Option<Duration>,
}

impl MockAskClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every answer back for `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_answer(&self, answer: impl Into<String>) {
        self.inner
            .results
            .lock()
            .unwrap()
            .push_back(CompletionResult::Answer(answer.into()));
    }

    pub fn queue_failure(&self, message: impl Into<String>) {
        self.inner
            .results
            .lock()
            .unwrap()
            .push_back(CompletionResult::Failed(message.into()));
    }

    /// Questions asked so far, in order
    pub fn recorded_questions(&self) -> Vec<String> {
        self.inner.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AskClient for MockAskClient {
    async fn ask(&self, question: &str) -> CompletionResult {
        self.inner
            .questions
            .lock()
            .unwrap()
            .push(question.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CompletionResult::Failed("No mock result queued".to_string()))
    }
}
