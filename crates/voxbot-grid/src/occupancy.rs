//! Cell-occupancy index: grid position → occupying module.

use indexmap::IndexMap;
use voxbot_core::{Face, GridVec, ModuleId};

/// Maps each occupied grid cell to the module sitting in it.
///
/// Derived state: rebuild it from the module set whenever positions or
/// membership change outside of [`apply_move`](OccupancyIndex::apply_move).
/// Duplicate positions in the input are a caller bug, not a recoverable
/// condition — the build keeps the last writer and stays silent about it.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    cells: IndexMap<GridVec, ModuleId>,
}

impl OccupancyIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(id, position)` pairs.
    ///
    /// Last write wins on duplicate positions.
    pub fn build(modules: impl IntoIterator<Item = (ModuleId, GridVec)>) -> Self {
        let mut index = Self::new();
        index.rebuild(modules);
        index
    }

    /// Reset and refill the index from `(id, position)` pairs.
    pub fn rebuild(&mut self, modules: impl IntoIterator<Item = (ModuleId, GridVec)>) {
        self.cells.clear();
        for (id, pos) in modules {
            self.cells.insert(pos, id);
        }
    }

    /// Whether any module occupies `pos`.
    pub fn is_occupied(&self, pos: GridVec) -> bool {
        self.cells.contains_key(&pos)
    }

    /// The module occupying `pos`, if any.
    pub fn occupant_at(&self, pos: GridVec) -> Option<ModuleId> {
        self.cells.get(&pos).copied()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Shift a validated group move into the index.
    ///
    /// Removes every selection entry at its old position, then inserts
    /// each at `old + dir.delta()`. Two-phase so a cell vacated by one
    /// selected module and entered by another resolves correctly.
    ///
    /// Call only after validation passed for this exact selection and
    /// direction; the operation is not atomic across a partial failure
    /// and does not re-check anything.
    pub fn apply_move(&mut self, selection: &[(ModuleId, GridVec)], dir: Face) {
        for (_, old) in selection {
            self.cells.shift_remove(old);
        }
        let delta = dir.delta();
        for &(id, old) in selection {
            self.cells.insert(old + delta, id);
        }
    }

    /// Whether moving `selection` by `dir` is a two-module position swap.
    ///
    /// Swap detection is not implemented: this always reports no swap,
    /// and the collision rule's only tolerance is for cells vacated by
    /// fellow selected modules.
    // TODO: detect two selected modules trading cells in a single step.
    pub fn is_swap_move(&self, _selection: &[(ModuleId, GridVec)], _dir: Face) -> bool {
        false
    }
}
