//! Undo/redo availability counters.
//!
//! A pure counter pair caching how many actions can be undone or redone.
//! The authoritative undo stack lives server-side; these counters only gate
//! requests and drive button state, and they tolerate drift (another
//! participant's undo) until the next full data refresh resynchronizes
//! them.

#[cfg(test)]
#[path = "undo_test.rs"]
mod undo_test;

/// Local cache of undo/redo availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UndoRedoCounters {
    undoable: usize,
    redoable: usize,
}

impl UndoRedoCounters {
    /// Create a zeroed counter pair.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set counters from hydrated history: `n` undoable actions, nothing
    /// redoable. Also used to resynchronize after a full refresh.
    pub fn initialize(&mut self, n: usize) {
        self.undoable = n;
        self.redoable = 0;
    }

    /// Record a successfully published local action. New work invalidates
    /// the redo history (linear-history semantics, not a branching tree).
    pub fn local_emit(&mut self) {
        self.undoable += 1;
        self.redoable = 0;
    }

    /// Record a server-confirmed undo.
    pub fn undo_applied(&mut self) {
        self.undoable = self.undoable.saturating_sub(1);
        self.redoable += 1;
    }

    /// Record a server-confirmed redo.
    pub fn redo_applied(&mut self) {
        self.redoable = self.redoable.saturating_sub(1);
        self.undoable += 1;
    }

    /// Drop the undoable count after the server reported an empty undo
    /// stack (local counter had drifted).
    pub fn clear_undoable(&mut self) {
        self.undoable = 0;
    }

    /// Drop the redoable count after the server reported an empty redo
    /// stack.
    pub fn clear_redoable(&mut self) {
        self.redoable = 0;
    }

    /// Whether an undo request is worth sending.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undoable > 0
    }

    /// Whether a redo request is worth sending.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.redoable > 0
    }

    /// Number of undoable actions.
    #[must_use]
    pub fn undoable(&self) -> usize {
        self.undoable
    }

    /// Number of redoable actions.
    #[must_use]
    pub fn redoable(&self) -> usize {
        self.redoable
    }
}
