//! Single-slot trailing-edge scheduling for debounced history records.

use std::time::{Duration, Instant};

/// A value waiting for its deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ScheduledValue<T> {
    value: T,
    due_at: Instant,
}

/// Cancellable handle holding at most one scheduled value.
///
/// Scheduling replaces any outstanding value; nothing is queued. The owner
/// drives it by calling [`Debouncer::take_due`] from its event loop.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    slot: Option<ScheduledValue<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Debouncer<T> {
    /// Replace the pending value, restarting the delay from `now`.
    pub(crate) fn schedule(&mut self, value: T, delay: Duration, now: Instant) {
        self.slot = Some(ScheduledValue {
            value,
            due_at: now + delay,
        });
    }

    /// Return the pending value once `now` reaches its deadline.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.slot {
            Some(scheduled) if now >= scheduled.due_at => self.take(),
            _ => None,
        }
    }

    /// Return the pending value regardless of its deadline.
    pub(crate) fn take(&mut self) -> Option<T> {
        self.slot.take().map(|scheduled| scheduled.value)
    }

    /// Drop the pending value. Returns `true` when one was dropped.
    pub(crate) fn cancel(&mut self) -> bool {
        self.slot.take().is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.slot.as_ref().map(|scheduled| scheduled.due_at)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::time::{Duration, Instant};

    #[test]
    fn reschedule_replaces_value_and_deadline() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        debouncer.schedule("first", Duration::from_millis(100), start);
        debouncer.schedule(
            "second",
            Duration::from_millis(100),
            start + Duration::from_millis(80),
        );

        assert_eq!(debouncer.take_due(start + Duration::from_millis(120)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(180))
        );
        assert_eq!(
            debouncer.take_due(start + Duration::from_millis(180)),
            Some("second")
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_reports_whether_anything_was_pending() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.cancel());
        debouncer.schedule(1u8, Duration::ZERO, Instant::now());
        assert!(debouncer.cancel());
        assert_eq!(debouncer.take(), None);
    }
}
