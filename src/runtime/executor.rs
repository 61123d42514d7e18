//! Chat runtime executor

use super::traits::AskClient;
use super::ChatHandle;
use crate::chat::{transition, ChatState, ChatUpdate, CompletionResult, Effect, Event, TurnId};
use crate::reveal::{RevealConfig, RevealStep, RevealUpdate, Revealer};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

const EVENT_CAPACITY: usize = 32;
const REVEAL_CAPACITY: usize = 64;
const UPDATE_CAPACITY: usize = 256;

/// Single-writer session runtime. Every state change happens on its task.
pub struct ChatRuntime<A>
where
    A: AskClient + 'static,
{
    state: ChatState,
    ask_client: Arc<A>,
    revealer: Revealer<TurnId>,
    event_rx: mpsc::Receiver<Event>,
    answer_tx: mpsc::Sender<(TurnId, CompletionResult)>,
    answer_rx: mpsc::Receiver<(TurnId, CompletionResult)>,
    reveal_rx: mpsc::Receiver<RevealUpdate<TurnId>>,
    updates_tx: broadcast::Sender<ChatUpdate>,
    snapshot_tx: watch::Sender<ChatState>,
}

impl<A> ChatRuntime<A>
where
    A: AskClient + 'static,
{
    /// Start a fresh session on the current tokio runtime
    pub fn spawn(ask_client: A, reveal_config: RevealConfig) -> ChatHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);
        let (answer_tx, answer_rx) = mpsc::channel(EVENT_CAPACITY);
        let (reveal_tx, reveal_rx) = mpsc::channel(REVEAL_CAPACITY);
        let (updates_tx, _) = broadcast::channel(UPDATE_CAPACITY);
        let state = ChatState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.clone());

        let runtime = Self {
            state,
            ask_client: Arc::new(ask_client),
            revealer: Revealer::new(reveal_config, reveal_tx),
            event_rx,
            answer_tx,
            answer_rx,
            reveal_rx,
            updates_tx: updates_tx.clone(),
            snapshot_tx,
        };
        tokio::spawn(runtime.run());

        ChatHandle {
            event_tx,
            updates_tx,
            snapshot_rx,
        }
    }

    async fn run(mut self) {
        tracing::info!("Starting chat runtime");

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event),
                    // Every handle is gone
                    None => break,
                },
                Some((request, result)) = self.answer_rx.recv() => {
                    self.process_event(Event::AnswerReceived { request, result });
                }
                Some(update) = self.reveal_rx.recv() => {
                    let event = match update.step {
                        RevealStep::Partial(shown) => Event::RevealProgress { turn: update.key, shown },
                        RevealStep::Complete(_) => {
                            self.revealer.finished(&update.key);
                            Event::RevealComplete { turn: update.key }
                        }
                    };
                    self.process_event(event);
                }
            }
        }

        self.revealer.cancel_all();
        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                // Transition errors are user-facing (e.g., "type a question first")
                tracing::debug!(error = %e, "Event rejected");
                let _ = self.updates_tx.send(ChatUpdate::Rejected {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state = result.new_state;
        self.snapshot_tx.send_replace(self.state.clone());

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PostQuestion { request, question } => {
                let client = self.ask_client.clone();
                let answer_tx = self.answer_tx.clone();
                tracing::info!(%request, chars = question.chars().count(), "Asking");
                tokio::spawn(async move {
                    let result = client.ask(&question).await;
                    // Runtime gone means nobody is waiting for this answer
                    let _ = answer_tx.send((request, result)).await;
                });
            }
            Effect::StartReveal { turn, text } => {
                self.revealer.start(turn, text);
            }
            Effect::CancelReveal { turn } => {
                if self.revealer.cancel(&turn) {
                    tracing::debug!(%turn, "Reveal cancelled");
                }
            }
            Effect::Notify(update) => {
                // No subscribers is fine
                let _ = self.updates_tx.send(update);
            }
        }
    }
}
