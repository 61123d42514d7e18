//! Pure state transition function

use super::{ChatState, ChatUpdate, Effect, Event, Phase, Role};
use crate::content;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Type a question first")]
    EmptyDraft,
    #[error("Still waiting for the previous answer")]
    Busy,
    #[error("No suggestion at position {0}")]
    UnknownSuggestion(usize),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
/// Events addressed to a request or turn that is no longer current are
/// ignored, which is how superseded asks and cancelled reveals stay out of
/// the transcript.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    let mut next = state.clone();

    match event {
        Event::DraftChanged { text } => {
            next.draft.set(&text);
            Ok(TransitionResult::new(next))
        }

        Event::SuggestionPicked { index } => {
            let text = content::suggestion(index).ok_or(TransitionError::UnknownSuggestion(index))?;
            next.draft.set(text);
            Ok(TransitionResult::new(next))
        }

        Event::Submit => submit(next),

        Event::AnswerReceived { request, result } => {
            if next.phase != (Phase::Asking { request }) {
                tracing::debug!(%request, "Ignoring answer for a superseded request");
                return Ok(TransitionResult::new(next));
            }

            let target = result.display_text().to_string();
            let turn = next.push_turn(Role::Assistant, String::new());
            let mut effects = Vec::with_capacity(2);
            if let Some(t) = next.turn_mut(turn) {
                t.revealing = true;
                effects.push(Effect::appended(t));
            }
            effects.push(Effect::StartReveal {
                turn,
                text: target.clone(),
            });
            next.phase = Phase::Revealing { turn, target };

            Ok(TransitionResult::new(next).with_effects(effects))
        }

        Event::RevealProgress { turn, shown } => {
            if next.revealing_turn() != Some(turn) {
                return Ok(TransitionResult::new(next));
            }
            let Some(t) = next.turn_mut(turn) else {
                return Ok(TransitionResult::new(next));
            };
            t.text.clone_from(&shown);
            Ok(TransitionResult::new(next).with_effect(Effect::turn_text(turn, shown)))
        }

        Event::RevealComplete { turn } => {
            if next.revealing_turn() != Some(turn) {
                return Ok(TransitionResult::new(next));
            }
            let effect = finalize_reveal(&mut next);
            Ok(TransitionResult::new(next).with_effects(effect))
        }

        Event::Reset => {
            let cancel = next
                .revealing_turn()
                .map(|turn| Effect::CancelReveal { turn });
            next.reset();
            Ok(TransitionResult::new(next)
                .with_effects(cancel)
                .with_effect(Effect::Notify(ChatUpdate::Reset)))
        }
    }
}

fn submit(mut next: ChatState) -> Result<TransitionResult, TransitionError> {
    if next.is_asking() {
        return Err(TransitionError::Busy);
    }
    if !next.draft.is_sendable() {
        return Err(TransitionError::EmptyDraft);
    }

    let mut effects = Vec::with_capacity(4);

    // A new question supersedes the running reveal: stop it and show the
    // old answer whole so two answers never interleave
    if let Some(turn) = next.revealing_turn() {
        effects.push(Effect::CancelReveal { turn });
        effects.extend(finalize_reveal(&mut next));
    }

    let question = next.draft.as_str().trim().to_string();
    let request = next.push_turn(Role::User, question.clone());
    if let Some(t) = next.turn(request) {
        effects.push(Effect::appended(t));
    }
    next.draft.clear();
    next.has_sent = true;
    next.phase = Phase::Asking { request };
    effects.push(Effect::PostQuestion { request, question });

    Ok(TransitionResult::new(next).with_effects(effects))
}

/// Write the full target into the revealing turn and go idle
fn finalize_reveal(next: &mut ChatState) -> Option<Effect> {
    if !matches!(next.phase, Phase::Revealing { .. }) {
        return None;
    }
    let Phase::Revealing { turn, target } = std::mem::take(&mut next.phase) else {
        return None;
    };
    let t = next.turn_mut(turn)?;
    t.text = target;
    t.revealing = false;
    Some(Effect::finished(t))
}
