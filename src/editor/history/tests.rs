//! Unit tests for the history module.

use super::MAX_HISTORY_SIZE;
use super::snapshot_history::SnapshotHistory;

#[test]
fn test_starts_at_initial_entry() {
    let history = SnapshotHistory::new(0);
    assert_eq!(history.current(), Some(&0));
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_commit_moves_cursor_to_end() {
    let mut history = SnapshotHistory::new(0);
    history.commit(1);
    history.commit(2);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.len(), 3);
    assert_eq!(history.current(), Some(&2));
}

#[test]
fn test_undo_redo_at_boundaries_are_noops() {
    let mut history = SnapshotHistory::new(0);
    assert_eq!(history.undo(), None);
    assert_eq!(history.redo(), None);

    history.commit(1);
    assert_eq!(history.redo(), None);
    assert_eq!(history.undo(), Some(&0));
    assert_eq!(history.undo(), None);
    assert_eq!(history.cursor(), 0);
    assert_eq!(history.redo(), Some(&1));
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut history = SnapshotHistory::new(vec![]);
    history.commit(vec!["trendline"]);
    history.commit(vec!["trendline", "circle"]);

    assert_eq!(history.undo(), Some(&vec!["trendline"]));
    assert!(history.can_redo());

    history.commit(vec!["trendline", "rectangle"]);
    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);

    // The circle entry is gone for good
    history.undo();
    assert_eq!(history.redo(), Some(&vec!["trendline", "rectangle"]));
}

#[test]
fn test_history_max_size() {
    let mut history = SnapshotHistory::new(0);

    // Push more than max size
    for i in 1..=(MAX_HISTORY_SIZE + 50) {
        history.commit(i);
    }

    // Should be trimmed to max size, oldest dropped first
    assert_eq!(history.len(), MAX_HISTORY_SIZE);
    assert_eq!(history.cursor(), MAX_HISTORY_SIZE - 1);
    assert_eq!(history.current(), Some(&(MAX_HISTORY_SIZE + 50)));

    let mut steps = 0;
    while history.undo().is_some() {
        steps += 1;
    }
    assert_eq!(steps, MAX_HISTORY_SIZE - 1);
    assert_eq!(history.current(), Some(&51));
}

#[test]
fn test_small_capacity() {
    let mut history = SnapshotHistory::with_capacity('a', 2);
    history.commit('b');
    history.commit('c');
    assert_eq!(history.len(), 2);
    assert_eq!(history.undo(), Some(&'b'));
    assert_eq!(history.undo(), None);
}
