//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the runtime with mock implementations.

use crate::chat::CompletionResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the ask proxy
#[async_trait]
pub trait AskClient: Send + Sync {
    /// Ask one question. Every failure is folded into
    /// [`CompletionResult::Failed`]; nothing is retried.
    async fn ask(&self, question: &str) -> CompletionResult;
}

#[async_trait]
impl<T: AskClient + ?Sized> AskClient for Arc<T> {
    async fn ask(&self, question: &str) -> CompletionResult {
        (**self).ask(question).await
    }
}
