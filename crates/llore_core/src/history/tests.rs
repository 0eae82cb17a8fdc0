use super::*;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

fn history_with(values: &[&str]) -> HistoryManager {
    let mut history = HistoryManager::new(values[0]);
    for value in &values[1..] {
        assert!(history.record(*value));
    }
    history
}

#[test]
fn worked_example_walks_back_and_forth() {
    let mut history = history_with(&["a", "ab", "abc"]);

    assert!(history.undo());
    assert_eq!(history.present(), "ab");
    assert!(history.undo());
    assert_eq!(history.present(), "a");
    assert!(!history.undo());
    assert_eq!(history.present(), "a");

    assert!(history.redo());
    assert_eq!(history.present(), "ab");
    assert!(history.redo());
    assert_eq!(history.present(), "abc");
    assert!(!history.redo());
    assert_eq!(history.present(), "abc");
}

#[test]
fn redo_pushes_replaced_present_onto_undo_stack() {
    let mut history = history_with(&["a", "ab", "abc"]);
    history.undo();
    history.undo();
    assert_eq!(history.undo_stack(), ["a"]);
    assert_eq!(
        history.redo_stack(),
        &VecDeque::from(["ab".to_string(), "abc".to_string()])
    );

    assert!(history.redo());
    assert_eq!(history.present(), "ab");
    assert_eq!(history.undo_stack(), ["a", "a"]);
    assert_eq!(history.redo_stack(), &VecDeque::from(["abc".to_string()]));

    assert!(history.redo());
    assert_eq!(history.undo_stack(), ["a", "a", "ab"]);
    assert!(history.redo_stack().is_empty());

    // Undo pops the pushed entry and restores the one before it.
    assert!(history.undo());
    assert_eq!(history.present(), "a");
    assert_eq!(history.undo_stack(), ["a", "a"]);
    assert_eq!(history.redo_stack(), &VecDeque::from(["abc".to_string()]));
}

#[test]
fn redo_updates_duplicate_guard_to_new_present() {
    let mut history = history_with(&["0", "1"]);
    history.undo();
    assert!(history.redo());
    assert_eq!(history.undo_stack(), ["0", "0"]);
    assert!(!history.record("1"));
    assert!(history.record("0"));
    assert_eq!(history.undo_stack(), ["0", "0", "0"]);
}

#[test]
fn n_undos_then_n_redos_restore_present_and_empty_redo() {
    let values = ["", "w", "wo", "wor", "word", "words"];
    let mut history = history_with(&values);
    let steps = values.len() - 1;

    for _ in 0..steps {
        assert!(history.undo());
    }
    assert_eq!(history.present(), "");
    assert_eq!(history.redo_stack().len(), steps);

    for _ in 0..steps {
        assert!(history.redo());
    }
    assert_eq!(history.present(), "words");
    assert!(history.redo_stack().is_empty());
    assert!(!history.can_redo());
}

#[test]
fn duplicate_record_is_a_silent_no_op() {
    let mut history = history_with(&["a", "ab"]);
    history.undo();
    let rx = history.subscribe();
    let undo_before = history.undo_stack().to_vec();
    let redo_before = history.redo_stack().clone();

    assert!(!history.record("a"));
    assert_eq!(history.undo_stack(), undo_before.as_slice());
    assert_eq!(history.redo_stack(), &redo_before);
    assert_eq!(history.present(), "a");
    assert!(rx.try_recv().is_err());
}

#[test]
fn fresh_record_discards_redo_branch() {
    let mut history = history_with(&["a", "ab", "abc"]);
    history.undo();
    assert!(history.can_redo());

    assert!(history.record("abX"));
    assert!(history.redo_stack().is_empty());
    assert_eq!(history.undo_stack(), ["a", "ab", "abX"]);
}

#[test]
fn undo_stack_is_capped_and_evicts_oldest_first() {
    let mut history = HistoryManager::new("0");
    for i in 1..=150 {
        history.record(i.to_string());
        assert!(history.undo_stack().len() <= DEFAULT_HISTORY_LIMIT);
    }
    assert_eq!(history.undo_stack().len(), 100);
    assert_eq!(history.undo_stack()[0], "51");

    history.record("151");
    assert_eq!(history.undo_stack().len(), 100);
    assert_eq!(history.undo_stack()[0], "52");
    assert_eq!(history.undo_stack()[99], "151");
}

#[test]
fn custom_limit_is_clamped_to_one() {
    let mut history = HistoryManager::with_limit("a", 0);
    assert_eq!(history.limit(), 1);
    history.record("b");
    assert_eq!(history.undo_stack(), ["b"]);
    assert!(!history.undo());
}

#[test]
fn reset_discards_everything() {
    let mut history = history_with(&["a", "ab", "abc"]);
    history.undo();
    history.record_debounced_at("pending", Duration::from_millis(10), Instant::now());

    history.reset("fresh");
    assert_eq!(history.present(), "fresh");
    assert_eq!(history.undo_stack(), ["fresh"]);
    assert!(history.redo_stack().is_empty());
    assert!(!history.has_pending());
    assert!(!history.record("fresh"));
}

#[test]
fn debounced_record_commits_last_value_after_quiet_period() {
    let mut history = HistoryManager::new("");
    let start = Instant::now();
    let delay = Duration::from_millis(500);

    history.record_debounced_at("h", delay, start);
    history.record_debounced_at("he", delay, start + Duration::from_millis(200));
    history.record_debounced_at("hey", delay, start + Duration::from_millis(400));

    assert!(!history.tick_at(start + Duration::from_millis(600)));
    assert_eq!(history.present(), "");
    assert_eq!(
        history.next_deadline(),
        Some(start + Duration::from_millis(900))
    );

    assert!(history.tick_at(start + Duration::from_millis(900)));
    assert_eq!(history.present(), "hey");
    assert_eq!(history.undo_stack(), ["", "hey"]);
    assert!(!history.tick_at(start + Duration::from_millis(2000)));
}

#[test]
fn flush_and_cancel_pending() {
    let mut history = HistoryManager::new("a");
    history.record_debounced_at("ab", Duration::from_secs(60), Instant::now());
    assert!(history.flush_pending());
    assert_eq!(history.present(), "ab");

    history.record_debounced_at("abc", Duration::from_secs(60), Instant::now());
    assert!(history.cancel_pending());
    assert!(!history.flush_pending());
    assert_eq!(history.present(), "ab");
}

#[test]
fn subscribers_see_each_change_and_dropped_ones_are_pruned() {
    let mut history = HistoryManager::new("a");
    let rx = history.subscribe();
    let dropped = history.subscribe();
    drop(dropped);

    history.record("ab");
    history.undo();
    history.redo();
    history.reset("z");

    let kinds: Vec<HistoryChangeKind> = rx.try_iter().map(|change| change.kind).collect();
    assert_eq!(
        kinds,
        vec![
            HistoryChangeKind::Recorded,
            HistoryChangeKind::Undone,
            HistoryChangeKind::Redone,
            HistoryChangeKind::Reset,
        ]
    );
    assert_eq!(history.subscribers.len(), 1);
}

#[test]
fn change_payload_reflects_stack_sizes() {
    let mut history = history_with(&["a", "ab"]);
    let rx = history.subscribe();
    history.undo();
    let change = rx.try_recv().expect("undo change");
    assert_eq!(
        change,
        HistoryChange {
            kind: HistoryChangeKind::Undone,
            present: "a".to_string(),
            undo_len: 1,
            redo_len: 1,
        }
    );
}
