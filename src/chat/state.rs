//! Chat session state types

use crate::content::WELCOME_MESSAGE;
use crate::markdown;
use crate::question::{self, MAX_QUESTION_UNITS};
use std::fmt;

/// Identifies a transcript turn. Never reused within a session, including
/// across resets, so late events for an old turn cannot match a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One exchange unit in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    /// Set while the reveal sequencer is still filling in `text`
    pub revealing: bool,
}

impl Turn {
    fn new(id: TurnId, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            revealing: false,
        }
    }

    /// Markdown rendering of a finalized turn; `None` while revealing, when
    /// only plain text is shown
    pub fn html(&self) -> Option<String> {
        (!self.revealing).then(|| markdown::to_html(&self.text))
    }
}

/// The in-progress input, bounded to the question limit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    /// Replace the draft; input past the limit is cut off like a `maxLength` box
    pub fn set(&mut self, text: &str) {
        self.0 = question::truncate(text, MAX_QUESTION_UNITS).to_string();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in UTF-16 code units, for the remaining-characters counter
    pub fn units(&self) -> usize {
        question::units(&self.0)
    }

    /// Whether the send action is enabled for this text
    pub fn is_sendable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

/// What the session is waiting on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A question is in flight; `request` is the user turn that asked it
    Asking { request: TurnId },
    /// The answer is being revealed into `turn`
    Revealing { turn: TurnId, target: String },
}

/// The whole client-side application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    pub transcript: Vec<Turn>,
    pub draft: Draft,
    pub phase: Phase,
    pub has_sent: bool,
    next_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        let mut state = Self {
            transcript: Vec::new(),
            draft: Draft::default(),
            phase: Phase::Idle,
            has_sent: false,
            next_id: 0,
        };
        state.push_welcome();
        state
    }

    /// Back to a fresh session, keeping the id counter running
    pub(crate) fn reset(&mut self) {
        self.transcript.clear();
        self.draft.clear();
        self.phase = Phase::Idle;
        self.has_sent = false;
        self.push_welcome();
    }

    fn push_welcome(&mut self) {
        let id = self.allocate_id();
        self.transcript
            .push(Turn::new(id, Role::Assistant, WELCOME_MESSAGE));
    }

    pub(crate) fn allocate_id(&mut self) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn push_turn(&mut self, role: Role, text: impl Into<String>) -> TurnId {
        let id = self.allocate_id();
        self.transcript.push(Turn::new(id, role, text));
        id
    }

    pub fn turn(&self, id: TurnId) -> Option<&Turn> {
        self.transcript.iter().find(|t| t.id == id)
    }

    pub(crate) fn turn_mut(&mut self, id: TurnId) -> Option<&mut Turn> {
        self.transcript.iter_mut().find(|t| t.id == id)
    }

    pub fn is_asking(&self) -> bool {
        matches!(self.phase, Phase::Asking { .. })
    }

    pub fn revealing_turn(&self) -> Option<TurnId> {
        match self.phase {
            Phase::Revealing { turn, .. } => Some(turn),
            _ => None,
        }
    }

    /// Whether the send button is enabled
    pub fn can_send(&self) -> bool {
        self.draft.is_sendable() && !self.is_asking()
    }

    /// Suggestion pills are only offered before the first question
    pub fn show_suggestions(&self) -> bool {
        !self.has_sent
    }
}
