//! Linear snapshot log with a cursor.

use super::MAX_HISTORY_SIZE;

/// Ordered list of snapshots plus a cursor.
///
/// Entry 0 is the initial state. Entries after the cursor are the redo
/// branch and are discarded by the next [`commit`](Self::commit).
#[derive(Debug, Clone)]
pub struct SnapshotHistory<T> {
    entries: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> SnapshotHistory<T> {
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, MAX_HISTORY_SIZE)
    }

    /// Keep at most `capacity` entries, dropping the oldest first
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record a new snapshot, discarding any redo branch
    pub fn commit(&mut self, snapshot: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        // Trim history if it exceeds max size
        let overflow = self.entries.len().saturating_sub(self.capacity);
        if overflow > 0 {
            self.entries.drain(..overflow);
        }

        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
