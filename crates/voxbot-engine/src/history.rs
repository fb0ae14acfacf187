//! Undo/redo history over session edits.

use voxbot_core::{Face, Module, ModuleId};

/// One reversible edit, with enough captured state to replay or revert it.
///
/// Ops capture values, not closures: an `AddModule` holds the module as it
/// was created (links are re-derived geometrically on replay), a
/// `RemoveModule` holds the full snapshot including links so undo can
/// restore the severed connections, and a `MoveGroup` is its own inverse
/// through the opposite face.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOp {
    /// A module was placed.
    AddModule {
        /// The module as created, before any links were attached.
        module: Module,
    },
    /// A module was removed.
    RemoveModule {
        /// The module as removed, links included.
        module: Module,
    },
    /// A validated group move was applied.
    MoveGroup {
        /// The ids that moved.
        ids: Vec<ModuleId>,
        /// The direction they moved in.
        dir: Face,
    },
}

/// Bounded double-stack undo/redo history.
///
/// [`record`](History::record) pushes a freshly performed edit, dropping
/// the oldest entry past the limit and clearing the redo stack — once a
/// new edit lands, the old future is gone. The session pops ops off one
/// stack, applies the inverse (or replay), and pushes them onto the other.
#[derive(Clone, Debug)]
pub struct History {
    undo: Vec<EditOp>,
    redo: Vec<EditOp>,
    limit: usize,
}

impl History {
    /// Default depth of the undo stack.
    pub const DEFAULT_LIMIT: usize = 100;

    /// Create a history retaining at most `limit` undoable edits.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Record a freshly performed edit.
    ///
    /// Clears the redo stack and drops the oldest undo entry when the
    /// stack exceeds its limit.
    pub fn record(&mut self, op: EditOp) {
        self.undo.push(op);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Pop the most recent undoable edit, if any.
    pub fn pop_undo(&mut self) -> Option<EditOp> {
        self.undo.pop()
    }

    /// Pop the most recent redoable edit, if any.
    pub fn pop_redo(&mut self) -> Option<EditOp> {
        self.redo.pop()
    }

    /// Push an edit that was just reverted onto the redo stack.
    pub fn push_redo(&mut self, op: EditOp) {
        self.redo.push(op);
    }

    /// Push an edit that was just replayed back onto the undo stack.
    ///
    /// Unlike [`record`](History::record) this keeps the redo stack: a
    /// redo must not erase the rest of the redoable future.
    pub fn push_undo(&mut self, op: EditOp) {
        self.undo.push(op);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undoable edits.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable edits.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}
