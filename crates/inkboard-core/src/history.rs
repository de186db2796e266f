//! Undo/redo history of stroke-list snapshots.

use crate::stroke::Stroke;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 100;

/// An independent copy of a stroke list.
pub type Snapshot = Vec<Stroke>;

/// Per-tab undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed edit by pushing the state from before it.
    ///
    /// Any redo history is discarded.
    pub fn commit(&mut self, pre_edit: Snapshot) {
        self.undo_stack.push(pre_edit);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Restore the previous state into `current`.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, current: &mut Snapshot) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let replaced = std::mem::replace(current, snapshot);
        self.redo_stack.push(replaced);
        true
    }

    /// Re-apply the last undone state into `current`.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, current: &mut Snapshot) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let replaced = std::mem::replace(current, snapshot);
        self.undo_stack.push(replaced);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
