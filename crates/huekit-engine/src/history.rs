//! Linear snapshot history with a cursor.
//!
//! [`History`] keeps every committed snapshot in one vector and a cursor
//! pointing at the current one. Snapshots are stored behind [`Arc`], so
//! handing the current state back to a caller never copies it.
//!
//! ```text
//! commit(s3)
//! ┌──────────────────────────────────────────────┐
//! │ Entries: [s0, s1, s2, s3]                    │
//! │ Cursor:               ^                      │
//! └──────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────────┐
//! │ Entries: [s0, s1, s2, s3]                    │
//! │ Cursor:       ^                              │
//! └──────────────────────────────────────────────┘
//!
//! commit(s4): new branch, s2 and s3 are dropped
//! ┌──────────────────────────────────────────────┐
//! │ Entries: [s0, s1, s4]                        │
//! │ Cursor:           ^                          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. After the first commit, `cursor < len`.
//! 2. Committing while the cursor is behind the tip truncates everything
//!    after the cursor before appending.
//! 3. `undo`, `redo` and `go_to` only move the cursor; they never add or
//!    remove entries.
//! 4. With a non-zero depth limit, `len <= max_depth` after any commit;
//!    eviction removes the oldest entries and shifts the cursor with them.

use std::fmt;
use std::sync::Arc;

/// Configuration for [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots to retain (0 = unlimited).
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[must_use]
    pub fn unlimited() -> Self {
        Self { max_depth: 0 }
    }
}

/// Linear undo/redo history of immutable snapshots.
pub struct History<T> {
    entries: Vec<Arc<T>>,
    cursor: usize,
    config: HistoryConfig,
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T> History<T> {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Commit a new snapshot, discarding any redo branch.
    pub fn commit(&mut self, state: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(Arc::new(state));
        self.cursor = self.entries.len() - 1;
        self.enforce_depth();

        tracing::trace!(
            target: "huekit.history",
            len = self.entries.len(),
            cursor = self.cursor,
            "snapshot committed"
        );
    }

    /// Step back one snapshot and return it.
    ///
    /// Returns `None` at the first snapshot or when empty.
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current().cloned()
    }

    /// Step forward one snapshot and return it.
    ///
    /// Returns `None` at the tip.
    pub fn redo(&mut self) -> Option<Arc<T>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current().cloned()
    }

    /// Jump to the snapshot at `index` and return it.
    ///
    /// Returns `None` (cursor unchanged) when `index` is out of range.
    pub fn go_to(&mut self, index: usize) -> Option<Arc<T>> {
        if index >= self.entries.len() {
            return None;
        }
        self.cursor = index;
        self.current().cloned()
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Arc<T>> {
        self.entries.get(self.cursor)
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot at `index`, regardless of the cursor.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<T>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    fn enforce_depth(&mut self) {
        let max = self.config.max_depth;
        if max == 0 || self.entries.len() <= max {
            return;
        }
        let excess = self.entries.len() - max;
        self.entries.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history: History<i32> = History::default();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.current().is_none());
    }

    #[test]
    fn commit_moves_cursor_to_tip() {
        let mut history = History::default();
        history.commit(1);
        history.commit(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(**history.current().unwrap(), 2);
    }

    #[test]
    fn undo_and_redo_walk_the_cursor() {
        let mut history = History::default();
        for v in 1..=3 {
            history.commit(v);
        }
        assert_eq!(*history.undo().unwrap(), 2);
        assert_eq!(*history.undo().unwrap(), 1);
        assert!(history.undo().is_none());
        assert_eq!(*history.redo().unwrap(), 2);
        assert_eq!(*history.redo().unwrap(), 3);
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn commit_after_undo_truncates_branch() {
        let mut history = History::default();
        for v in 1..=4 {
            history.commit(v);
        }
        history.undo();
        history.undo();
        history.commit(10);
        let values: Vec<i32> = history.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 10]);
        assert!(!history.can_redo());
    }

    #[test]
    fn go_to_jumps_without_changing_entries() {
        let mut history = History::default();
        for v in 0..5 {
            history.commit(v);
        }
        assert_eq!(*history.go_to(1).unwrap(), 1);
        assert_eq!(history.cursor(), 1);
        assert!(history.go_to(5).is_none());
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn depth_limit_evicts_oldest() {
        let mut history = History::new(HistoryConfig::new(3));
        for v in 0..5 {
            history.commit(v);
        }
        let values: Vec<i32> = history.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn clear_resets() {
        let mut history = History::default();
        history.commit("a");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn debug_impl_reports_shape() {
        let mut history = History::default();
        history.commit(1u8);
        let debug_str = format!("{history:?}");
        assert!(debug_str.contains("History"));
        assert!(debug_str.contains("cursor"));
    }
}
