//! Reveal sequencer
//!
//! Presents an already-complete answer as if it were arriving incrementally:
//! every tick shows `chunk_size` more characters, then the full text is
//! announced once as complete. This is presentation only; the provider is
//! never streamed from.
//!
//! [`RevealCursor`] is the pure stepping logic. [`spawn`] drives a cursor on a
//! tokio timer and [`Revealer`] keeps at most one running sequence per slot.

#[cfg(test)]
mod proptests;

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Pacing of a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Characters added per tick
    pub chunk_size: NonZeroUsize,
    pub interval: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::MIN,
            interval: Duration::from_millis(10),
        }
    }
}

/// One step of a reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// The prefix to display now
    Partial(String),
    /// The full text; sent exactly once, last
    Complete(String),
}

impl RevealStep {
    pub fn text(&self) -> &str {
        match self {
            RevealStep::Partial(text) | RevealStep::Complete(text) => text,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, RevealStep::Complete(_))
    }
}

/// Pure cursor over a target string.
///
/// Chunks are counted in characters so a prefix never splits a code point.
#[derive(Debug, Clone)]
pub struct RevealCursor {
    target: String,
    chunk_size: usize,
    /// Byte offset of the end of the shown prefix
    offset: usize,
    done: bool,
}

impl RevealCursor {
    pub fn new(target: impl Into<String>, chunk_size: NonZeroUsize) -> Self {
        Self {
            target: target.into(),
            chunk_size: chunk_size.get(),
            offset: 0,
            done: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Currently displayed prefix
    pub fn shown(&self) -> &str {
        self.target.get(..self.offset).unwrap_or_default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one tick. Yields `Partial` prefixes until the cursor passes the
    /// end, then `Complete` once, then `None` forever.
    pub fn tick(&mut self) -> Option<RevealStep> {
        if self.done {
            return None;
        }

        if self.offset >= self.target.len() {
            self.done = true;
            return Some(RevealStep::Complete(self.target.clone()));
        }

        let rest = self.target.get(self.offset..).unwrap_or_default();
        let advance = rest
            .char_indices()
            .nth(self.chunk_size)
            .map_or(rest.len(), |(idx, _)| idx);
        self.offset += advance;

        Some(RevealStep::Partial(self.shown().to_string()))
    }
}

/// A step tagged with the slot it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealUpdate<K> {
    pub key: K,
    pub step: RevealStep,
}

/// Handle to a running reveal. Cancelling is idempotent; dropping cancels.
#[derive(Debug)]
pub struct RevealHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RevealHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the driving task has exited, whether completed or cancelled
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Start revealing `target` for `key`, sending each step to `updates`.
///
/// An empty target completes immediately without waiting for a tick. Every
/// partial step waits one interval first, like a repeating browser timer.
pub fn spawn<K>(
    key: K,
    target: impl Into<String>,
    config: RevealConfig,
    updates: mpsc::Sender<RevealUpdate<K>>,
) -> RevealHandle
where
    K: Clone + Send + 'static,
{
    let token = CancellationToken::new();
    let cursor = RevealCursor::new(target, config.chunk_size);
    let task = tokio::spawn(drive(key, cursor, config.interval, updates, token.clone()));
    RevealHandle { token, task }
}

async fn drive<K: Clone>(
    key: K,
    mut cursor: RevealCursor,
    interval: Duration,
    updates: mpsc::Sender<RevealUpdate<K>>,
    token: CancellationToken,
) {
    // A zero interval reveals without waiting; tokio rejects zero-period intervals
    let mut ticker = (!interval.is_zero()).then(|| {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    while let Some(step) = cursor.tick() {
        let complete = step.is_complete();

        if let (false, Some(ticker)) = (complete, ticker.as_mut()) {
            tokio::select! {
                biased;
                () = token.cancelled() => return,
                _ = ticker.tick() => {}
            }
        }

        if token.is_cancelled() {
            return;
        }

        let update = RevealUpdate {
            key: key.clone(),
            step,
        };
        tokio::select! {
            biased;
            () = token.cancelled() => return,
            sent = updates.send(update) => {
                if sent.is_err() {
                    // Receiver gone, nobody left to show this to
                    return;
                }
            }
        }

        if complete {
            return;
        }
    }
}

/// Reveal `target` into `out`, writing only what each step adds.
///
/// Returns once the completion step has been written.
pub async fn write_revealed<W: std::io::Write>(
    target: &str,
    config: RevealConfig,
    out: &mut W,
) -> std::io::Result<()> {
    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn((), target.to_string(), config, tx);

    let mut written = 0;
    while let Some(update) = rx.recv().await {
        let text = update.step.text();
        if let Some(delta) = text.get(written..) {
            out.write_all(delta.as_bytes())?;
            out.flush()?;
            written = text.len();
        }
        if update.step.is_complete() {
            break;
        }
    }
    Ok(())
}

/// Owns the running reveals, at most one per slot
pub struct Revealer<K> {
    config: RevealConfig,
    updates: mpsc::Sender<RevealUpdate<K>>,
    active: HashMap<K, RevealHandle>,
}

impl<K> Revealer<K>
where
    K: Clone + Eq + Hash + Send + std::fmt::Debug + 'static,
{
    pub fn new(config: RevealConfig, updates: mpsc::Sender<RevealUpdate<K>>) -> Self {
        Self {
            config,
            updates,
            active: HashMap::new(),
        }
    }

    /// Start a reveal for `key`, cancelling whatever ran there before
    pub fn start(&mut self, key: K, target: impl Into<String>) {
        let handle = spawn(key.clone(), target, self.config, self.updates.clone());
        if let Some(previous) = self.active.insert(key.clone(), handle) {
            tracing::debug!(slot = ?key, "Superseding active reveal");
            previous.cancel();
        }
    }

    /// Stop the reveal for `key`, if any. Returns whether one was running.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.active.remove(key) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.cancel();
                running
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.cancel();
        }
    }

    /// Forget a slot whose reveal delivered its completion
    pub fn finished(&mut self, key: &K) {
        self.active.remove(key);
    }

    pub fn active_count(&self) -> usize {
        self.active
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}
