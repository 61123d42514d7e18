//! Events that can occur in a chat session

use super::state::TurnId;
use crate::content::{ERROR_APOLOGY, NO_RESPONSE};

/// Outcome of one ask round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Answer(String),
    Failed(String),
}

impl CompletionResult {
    /// What the assistant turn shows. Failures read the same for every cause.
    pub fn display_text(&self) -> &str {
        match self {
            CompletionResult::Answer(text) if text.is_empty() => NO_RESPONSE,
            CompletionResult::Answer(text) => text,
            CompletionResult::Failed(_) => ERROR_APOLOGY,
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    DraftChanged {
        text: String,
    },
    SuggestionPicked {
        index: usize,
    },
    Submit,
    Reset,

    // Ask events
    AnswerReceived {
        request: TurnId,
        result: CompletionResult,
    },

    // Reveal events
    RevealProgress {
        turn: TurnId,
        shown: String,
    },
    RevealComplete {
        turn: TurnId,
    },
}
