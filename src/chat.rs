//! Chat session model
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! transcript, the draft and the ask/reveal phase live in one owned
//! [`ChatState`]; the runtime executes the [`Effect`]s a transition asks for.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{ChatUpdate, Effect};
pub use event::{CompletionResult, Event};
pub use state::{ChatState, Draft, Phase, Role, Turn, TurnId};
pub use transition::{transition, TransitionError, TransitionResult};
