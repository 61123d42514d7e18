//! Effects produced by state transitions

use super::state::{Turn, TurnId};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the question to the ask proxy (spawns as background task)
    PostQuestion { request: TurnId, question: String },

    /// Begin revealing `text` into `turn`
    StartReveal { turn: TurnId, text: String },

    /// Stop the reveal running for `turn`
    CancelReveal { turn: TurnId },

    /// Notify views
    Notify(ChatUpdate),
}

/// What views need to hear about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    TurnAppended(Turn),
    TurnText { turn: TurnId, text: String },
    TurnFinished(Turn),
    Reset,
    Rejected { message: String },
}

impl Effect {
    pub fn appended(turn: &Turn) -> Self {
        Effect::Notify(ChatUpdate::TurnAppended(turn.clone()))
    }

    pub fn finished(turn: &Turn) -> Self {
        Effect::Notify(ChatUpdate::TurnFinished(turn.clone()))
    }

    pub fn turn_text(turn: TurnId, text: impl Into<String>) -> Self {
        Effect::Notify(ChatUpdate::TurnText {
            turn,
            text: text.into(),
        })
    }
}
