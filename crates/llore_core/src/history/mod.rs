//! Snapshot-based undo/redo history for a single text value.
//!
//! Every committed state is stored whole. The undo stack is oldest-first and
//! ends with the present value after a record; the redo stack is nearest-first
//! so both directions only touch the ends of their stacks.

mod debounce;

use crate::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_HISTORY_LIMIT};
use crossbeam_channel::{unbounded, Receiver, Sender};
use debounce::Debouncer;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Which operation produced a [`HistoryChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryChangeKind {
    Recorded,
    Undone,
    Redone,
    Reset,
}

/// Notification sent to subscribers after every state-changing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryChange {
    pub kind: HistoryChangeKind,
    pub present: String,
    pub undo_len: usize,
    pub redo_len: usize,
}

/// Undo/redo stacks for one observable text buffer.
#[derive(Debug)]
pub struct HistoryManager {
    present: String,
    undo: Vec<String>,
    redo: VecDeque<String>,
    last_recorded: String,
    limit: usize,
    pending: Debouncer<String>,
    subscribers: Vec<Sender<HistoryChange>>,
}

impl HistoryManager {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history capped at `limit` undo entries (at least one).
    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        let initial = initial.into();
        Self {
            present: initial.clone(),
            undo: vec![initial.clone()],
            redo: VecDeque::new(),
            last_recorded: initial,
            limit: limit.max(1),
            pending: Debouncer::default(),
            subscribers: Vec::new(),
        }
    }

    /// Current text value.
    pub fn present(&self) -> &str {
        self.present.as_str()
    }

    /// Committed states, oldest first. Ends with the present value after a record.
    pub fn undo_stack(&self) -> &[String] {
        self.undo.as_slice()
    }

    /// Undone states, nearest first.
    pub fn redo_stack(&self) -> &VecDeque<String> {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Register a listener for state changes.
    ///
    /// Dropping the receiver unsubscribes it on the next change.
    pub fn subscribe(&mut self) -> Receiver<HistoryChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Commit `value` as the new present state unless it equals the last
    /// committed value.
    ///
    /// Committing discards every redo entry.
    ///
    /// # Returns
    /// `true` when the value was committed.
    pub fn record(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.last_recorded {
            trace!("history record skipped: unchanged value");
            return false;
        }
        self.undo.push(value.clone());
        self.trim_undo();
        self.redo.clear();
        self.last_recorded = value.clone();
        self.present = value;
        debug!(undo_len = self.undo.len(), "history recorded");
        self.notify(HistoryChangeKind::Recorded);
        true
    }

    /// Step back to the previous committed state.
    ///
    /// Does nothing when only the initial state remains.
    ///
    /// # Returns
    /// `true` when the present value changed.
    pub fn undo(&mut self) -> bool {
        if self.undo.len() < 2 {
            return false;
        }
        self.undo.pop();
        let Some(previous) = self.undo.last().cloned() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.redo.push_front(current);
        self.last_recorded = self.present.clone();
        debug!(
            undo_len = self.undo.len(),
            redo_len = self.redo.len(),
            "history undo"
        );
        self.notify(HistoryChangeKind::Undone);
        true
    }

    /// Re-apply the most recently undone state.
    ///
    /// The value being replaced goes onto the undo stack, so a following undo
    /// lands on the state that was present before this redo.
    ///
    /// # Returns
    /// `true` when the present value changed.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop_front() else {
            return false;
        };
        let replaced = std::mem::replace(&mut self.present, next);
        self.undo.push(replaced);
        self.trim_undo();
        self.last_recorded = self.present.clone();
        debug!(
            undo_len = self.undo.len(),
            redo_len = self.redo.len(),
            "history redo"
        );
        self.notify(HistoryChangeKind::Redone);
        true
    }

    /// Discard all history and start over from `value`.
    ///
    /// A pending debounced record is dropped too, otherwise it would land on
    /// top of the new baseline once due.
    pub fn reset(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.pending.cancel();
        self.undo.clear();
        self.undo.push(value.clone());
        self.redo.clear();
        self.last_recorded = value.clone();
        self.present = value;
        self.notify(HistoryChangeKind::Reset);
    }

    /// Schedule `record(value)` once `delay` passes without another call.
    ///
    /// A later call replaces the pending value and restarts the delay.
    pub fn record_debounced(&mut self, value: impl Into<String>, delay: Duration) {
        self.record_debounced_at(value, delay, Instant::now());
    }

    /// [`HistoryManager::record_debounced`] with the default 500 ms delay.
    pub fn record_debounced_default(&mut self, value: impl Into<String>) {
        self.record_debounced(value, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    }

    /// Clock-explicit form of [`HistoryManager::record_debounced`].
    pub fn record_debounced_at(&mut self, value: impl Into<String>, delay: Duration, now: Instant) {
        self.pending.schedule(value.into(), delay, now);
    }

    /// Commit the pending debounced value if its delay has elapsed.
    ///
    /// Hosts call this from their event loop.
    ///
    /// # Returns
    /// `true` when a pending value was committed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Clock-explicit form of [`HistoryManager::tick`].
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.pending.take_due(now) {
            Some(value) => self.record(value),
            None => false,
        }
    }

    /// Commit the pending debounced value now, ignoring its deadline.
    pub fn flush_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(value) => self.record(value),
            None => false,
        }
    }

    /// Drop the pending debounced value without committing it.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.cancel()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Instant at which the pending debounced value becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    fn trim_undo(&mut self) {
        if self.undo.len() > self.limit {
            let excess = self.undo.len() - self.limit;
            self.undo.drain(..excess);
        }
    }

    fn notify(&mut self, kind: HistoryChangeKind) {
        if self.subscribers.is_empty() {
            return;
        }
        let change = HistoryChange {
            kind,
            present: self.present.clone(),
            undo_len: self.undo.len(),
            redo_len: self.redo.len(),
        };
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests;
