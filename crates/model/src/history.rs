//! Bounded undo history over document snapshots
//!
//! The history stack holds deep copies of the undoable document state,
//! taken before each mutation. It behaves as a bounded LIFO with
//! head-drop: once the cap is reached the oldest entry is discarded to
//! make room. There is no redo stack.

use crate::relationship::Relationship;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of undo steps retained
pub const MAX_HISTORY: usize = 20;

// ============================================================================
// Snapshot
// ============================================================================

/// An immutable deep copy of `{tables, relationships}` at a point before
/// a mutation
///
/// Snapshots hold independent values, never references into the live
/// document, so restoring one cannot alias live objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    tables: Vec<Table>,
    relationships: Vec<Relationship>,
}

impl Snapshot {
    /// Create a snapshot from deep-copied state
    pub fn new(tables: Vec<Table>, relationships: Vec<Relationship>) -> Self {
        Self {
            tables,
            relationships,
        }
    }

    /// Consume the snapshot, yielding the captured state
    pub fn into_parts(self) -> (Vec<Table>, Vec<Relationship>) {
        (self.tables, self.relationships)
    }

    /// Number of tables captured
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

// ============================================================================
// History
// ============================================================================

/// Bounded undo stack over full-document snapshots
#[derive(Debug, Clone, Default)]
pub struct History {
    stack: VecDeque<Snapshot>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot; the oldest entry is evicted first when the stack
    /// is full
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.stack.len() >= MAX_HISTORY {
            self.stack.pop_front();
        }
        self.stack.push_back(snapshot);
    }

    /// Pop the most recent snapshot; `None` when empty (undo is then a
    /// no-op, not an error)
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop_back()
    }

    /// Number of undo steps available
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Check if no undo steps are available
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn snapshot_with(n: usize) -> Snapshot {
        let tables = (0..n)
            .map(|i| Table::new(format!("t{i}")).with_column(Column::new("id", "id")))
            .collect();
        Snapshot::new(tables, Vec::new())
    }

    #[test]
    fn test_push_pop_order() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        history.push(snapshot_with(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().table_count(), 2);
        assert_eq!(history.pop().unwrap().table_count(), 1);
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_bounded_eviction() {
        let mut history = History::new();
        for i in 0..MAX_HISTORY + 5 {
            history.push(snapshot_with(i));
        }

        // Exactly the most recent 20 remain
        assert_eq!(history.len(), MAX_HISTORY);

        // Newest first on pop; the 5 oldest were dropped
        let mut counts = Vec::new();
        while let Some(s) = history.pop() {
            counts.push(s.table_count());
        }
        assert_eq!(counts.first(), Some(&(MAX_HISTORY + 4)));
        assert_eq!(counts.last(), Some(&5));
    }

    #[test]
    fn test_empty_pop_is_noop() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(snapshot_with(1));
        history.clear();
        assert!(history.is_empty());
    }
}
