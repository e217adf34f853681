//! Undo/Redo for the annotation board.
//!
//! The history is a linear log of complete shape-collection snapshots. Every
//! finished gesture or command records one snapshot; undo and redo move a
//! cursor through the log and restore the snapshot under it.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last action
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone action
//!
//! Both are ignored while a gesture is in progress.
//!
//! ## Module Structure
//!
//! - [`snapshot_history`] - SnapshotHistory log with a cursor
//! - [`systems`] - Bevy systems for keyboard shortcuts

mod snapshot_history;
mod systems;

#[cfg(test)]
mod tests;

// Re-exports
pub use snapshot_history::SnapshotHistory;
pub use systems::{handle_redo, handle_undo};

/// Maximum number of snapshots to keep in history
pub(crate) const MAX_HISTORY_SIZE: usize = 200;
