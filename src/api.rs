//! HTTP API for the portfolio site
//!
//! `POST /api/ask` proxies one visitor question to the completion provider;
//! the remaining routes serve liveness, version and static site copy.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::LlmService;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider key is configured
    pub llm: Option<Arc<dyn LlmService>>,
    /// Built UI served for unmatched routes
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            llm,
            static_dir: None,
        }
    }

    #[must_use]
    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}
