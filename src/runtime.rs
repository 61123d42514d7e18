//! Chat session runtime
//!
//! Owns a [`ChatState`], applies events through the pure transition and
//! executes the resulting effects: asking the proxy, driving reveal timers
//! and notifying views.

mod ask_client;
mod executor;
#[cfg(test)]
mod testing;
mod traits;

pub use ask_client::HttpAskClient;
pub use executor::ChatRuntime;
pub use traits::AskClient;

use crate::chat::{ChatState, ChatUpdate, Event};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Chat runtime has stopped")]
    Stopped,
    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Cloneable handle for views to drive a running session
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    updates_tx: broadcast::Sender<ChatUpdate>,
    snapshot_rx: watch::Receiver<ChatState>,
}

impl ChatHandle {
    /// Queue an event for the session
    pub async fn send(&self, event: Event) -> Result<(), RuntimeError> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::Stopped)
    }

    /// Subscribe to view updates from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ChatUpdate> {
        self.updates_tx.subscribe()
    }

    /// Copy of the current session state
    pub fn snapshot(&self) -> ChatState {
        self.snapshot_rx.borrow().clone()
    }
}
