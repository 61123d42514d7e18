//! Property-based tests for the chat state machine
//!
//! Random user/ask/reveal interleavings must keep the transcript coherent.

use super::*;
use crate::question::MAX_QUESTION_UNITS;
use proptest::prelude::*;
use std::collections::HashSet;

/// Abstract actions, resolved against the current state when applied
#[derive(Debug, Clone)]
enum Action {
    Type(String),
    Pick(usize),
    Submit,
    Answer { ok: bool, text: String },
    StaleAnswer(String),
    Tick(usize),
    Complete,
    StaleTick,
    Reset,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-zA-Z ?]{0,300}".prop_map(Action::Type),
        (0usize..5).prop_map(Action::Pick),
        Just(Action::Submit),
        (any::<bool>(), "[a-z ]{0,40}").prop_map(|(ok, text)| Action::Answer { ok, text }),
        "[a-z]{1,10}".prop_map(Action::StaleAnswer),
        (0usize..50).prop_map(Action::Tick),
        Just(Action::Complete),
        Just(Action::StaleTick),
        Just(Action::Reset),
    ]
}

fn to_event(state: &ChatState, action: Action) -> Option<Event> {
    match action {
        Action::Type(text) => Some(Event::DraftChanged { text }),
        Action::Pick(index) => Some(Event::SuggestionPicked { index }),
        Action::Submit => Some(Event::Submit),
        Action::Reset => Some(Event::Reset),
        Action::Answer { ok, text } => match state.phase {
            Phase::Asking { request } => Some(Event::AnswerReceived {
                request,
                result: if ok {
                    CompletionResult::Answer(text)
                } else {
                    CompletionResult::Failed(text)
                },
            }),
            _ => None,
        },
        Action::StaleAnswer(text) => Some(Event::AnswerReceived {
            request: TurnId(u64::MAX),
            result: CompletionResult::Answer(text),
        }),
        Action::Tick(chars) => match &state.phase {
            Phase::Revealing { turn, target } => Some(Event::RevealProgress {
                turn: *turn,
                shown: target.chars().take(chars).collect(),
            }),
            _ => None,
        },
        Action::Complete => state
            .revealing_turn()
            .map(|turn| Event::RevealComplete { turn }),
        Action::StaleTick => Some(Event::RevealProgress {
            turn: TurnId(u64::MAX),
            shown: "stale".to_string(),
        }),
    }
}

fn check_invariants(state: &ChatState) -> Result<(), TestCaseError> {
    prop_assert!(!state.transcript.is_empty());
    prop_assert_eq!(state.transcript[0].role, Role::Assistant);
    prop_assert!(state.draft.units() <= MAX_QUESTION_UNITS);

    let ids: HashSet<_> = state.transcript.iter().map(|t| t.id).collect();
    prop_assert_eq!(ids.len(), state.transcript.len(), "turn ids unique");

    let revealing: Vec<_> = state.transcript.iter().filter(|t| t.revealing).collect();
    match &state.phase {
        Phase::Revealing { turn, target } => {
            prop_assert_eq!(revealing.len(), 1);
            prop_assert_eq!(revealing[0].id, *turn);
            prop_assert!(target.starts_with(&revealing[0].text));
        }
        Phase::Asking { request } => {
            prop_assert!(revealing.is_empty());
            let asked = state.turn(*request);
            prop_assert!(asked.is_some_and(|t| t.role == Role::User));
        }
        Phase::Idle => prop_assert!(revealing.is_empty()),
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_transcript_stays_coherent(actions in proptest::collection::vec(arb_action(), 1..60)) {
        let mut state = ChatState::new();
        for action in actions {
            let Some(event) = to_event(&state, action) else { continue };
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
            check_invariants(&state)?;
        }
    }

    #[test]
    fn prop_transcript_only_grows_between_resets(actions in proptest::collection::vec(arb_action(), 1..60)) {
        let mut state = ChatState::new();
        for action in actions {
            let is_reset = matches!(action, Action::Reset);
            let Some(event) = to_event(&state, action) else { continue };
            let Ok(result) = transition(&state, event) else { continue };
            if !is_reset {
                prop_assert!(result.new_state.transcript.len() >= state.transcript.len());
                for (before, after) in state.transcript.iter().zip(&result.new_state.transcript) {
                    prop_assert_eq!(before.id, after.id);
                }
            }
            state = result.new_state;
        }
    }

    #[test]
    fn prop_start_reveal_only_from_asking(actions in proptest::collection::vec(arb_action(), 1..60)) {
        let mut state = ChatState::new();
        for action in actions {
            let Some(event) = to_event(&state, action) else { continue };
            let was_asking = state.is_asking();
            let Ok(result) = transition(&state, event) else { continue };
            let starts = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::StartReveal { .. }))
                .count();
            prop_assert!(starts <= 1);
            if starts == 1 {
                prop_assert!(was_asking);
            }
            state = result.new_state;
        }
    }
}
