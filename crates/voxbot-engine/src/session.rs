//! The owning session context for one editing/validation lifetime.

use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};
use indexmap::IndexSet;
use tracing::debug;
use voxbot_core::{
    ConnectionMeta, Face, GridVec, Module, ModuleId, ModuleIdAllocator, MoveReceipt, WorldEvent,
};
use voxbot_grid::{Bounds, OccupancyIndex};

use crate::graph::ConnectivityGraph;
use crate::history::{EditOp, History};
use crate::validator::MovementValidator;

// ── SessionConfig ───────────────────────────────────────────────

/// Configuration for constructing a [`Session`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The inclusive workspace cuboid all modules must stay inside.
    pub bounds: Bounds,
    /// Depth of the undo stack. Default: [`History::DEFAULT_LIMIT`].
    pub history_limit: usize,
}

impl SessionConfig {
    /// A configuration with the given bounds and the default history depth.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            history_limit: History::DEFAULT_LIMIT,
        }
    }

    /// Check structural invariants before the session is built.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.history_limit == 0 {
            return Err(SessionError::HistoryLimitZero);
        }
        Ok(())
    }
}

/// Errors detected during [`SessionConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A zero-depth history cannot record any edit.
    HistoryLimitZero,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryLimitZero => write!(f, "history limit must be at least 1"),
        }
    }
}

impl std::error::Error for SessionError {}

// ── Session ─────────────────────────────────────────────────────

/// The explicit owning context for a module structure being edited.
///
/// A session owns the connectivity graph (and through it the modules),
/// the workspace bounds, the id allocator, the current selection, the
/// undo/redo history, and the subscriber list — everything the original
/// collaborators reached through ambient state. All mutation goes through
/// `&mut self`, so the borrow checker enforces the single-writer,
/// no-interleaving contract: one operation completes, including its index
/// and event updates, before the next can start.
///
/// The occupancy index it maintains is derived state for placement
/// queries; the movement validator builds its own snapshot per call.
#[derive(Debug)]
pub struct Session {
    graph: ConnectivityGraph,
    bounds: Bounds,
    ids: ModuleIdAllocator,
    selection: IndexSet<ModuleId>,
    occupancy: OccupancyIndex,
    history: History,
    subscribers: Vec<Sender<WorldEvent>>,
}

impl Session {
    /// Create an empty session from a validated configuration.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            graph: ConnectivityGraph::new(),
            bounds: config.bounds,
            ids: ModuleIdAllocator::new(),
            selection: IndexSet::new(),
            occupancy: OccupancyIndex::new(),
            history: History::new(config.history_limit),
            subscribers: Vec::new(),
        })
    }

    // ── Read access ─────────────────────────────────────────────

    /// The workspace bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The connectivity graph (read-only; mutate through session ops).
    pub fn graph(&self) -> &ConnectivityGraph {
        &self.graph
    }

    /// The module with the given id, if present.
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.graph.get(id)
    }

    /// Iterate over all modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.graph.modules()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Whether the session holds no modules.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// The currently selected ids, in selection order.
    pub fn selection(&self) -> &IndexSet<ModuleId> {
        &self.selection
    }

    /// The module occupying `pos`, if any. Placement UIs use this to
    /// offer only empty cells.
    pub fn occupant_at(&self, pos: GridVec) -> Option<ModuleId> {
        self.occupancy.occupant_at(pos)
    }

    /// Whether any module occupies `pos`.
    pub fn is_occupied(&self, pos: GridVec) -> bool {
        self.occupancy.is_occupied(pos)
    }

    // ── Events ──────────────────────────────────────────────────

    /// Register a subscriber and return its event channel.
    ///
    /// Every state change emits typed [`WorldEvent`]s to all live
    /// subscribers; a subscriber whose receiver was dropped is silently
    /// unregistered on the next emit.
    pub fn subscribe(&mut self) -> Receiver<WorldEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: WorldEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ── Structural edits ────────────────────────────────────────

    /// Place a new module at `position`, auto-connecting it rigidly to
    /// every geometrically adjacent module. Returns the new id.
    ///
    /// Recorded in history; emits `ModulesChanged` and `GraphChanged`.
    pub fn place_module(&mut self, position: GridVec) -> ModuleId {
        let id = self.ids.next_id();
        let module = Module::new(id, position);
        let snapshot = module.clone();

        debug!(module = %id, %position, "place module");
        self.graph.add_module(module);
        self.autoconnect(id);
        self.rebuild_occupancy();

        self.history.record(EditOp::AddModule { module: snapshot });
        self.emit(WorldEvent::ModulesChanged);
        self.emit(WorldEvent::GraphChanged);
        id
    }

    /// Insert a fully constructed module, preserving its id.
    ///
    /// The import path uses this to rebuild a saved structure: links come
    /// from explicit [`connect`](Session::connect) calls, so no
    /// auto-connection happens and nothing is recorded in history. The id
    /// allocator is bumped past the inserted id. No-op if the id is
    /// already present.
    pub fn insert_module(&mut self, module: Module) {
        self.ids.bump_past(module.id());
        self.graph.add_module(module);
        self.rebuild_occupancy();
        self.emit(WorldEvent::ModulesChanged);
    }

    /// Remove a module, detaching its surviving neighbours and splitting
    /// components as needed. Returns false if the id is unknown.
    ///
    /// Recorded in history; emits `ModulesChanged` and `GraphChanged`.
    pub fn remove_module(&mut self, id: ModuleId) -> bool {
        let Some(removed) = self.graph.remove_module(id) else {
            return false;
        };
        debug!(module = %id, "remove module");
        self.selection.shift_remove(&id);
        self.rebuild_occupancy();

        self.history.record(EditOp::RemoveModule { module: removed });
        self.emit(WorldEvent::ModulesChanged);
        self.emit(WorldEvent::GraphChanged);
        true
    }

    /// Record an explicit connection between two modules.
    ///
    /// Emits `GraphChanged`. Not recorded in history (the original editor
    /// tracks voxel add/delete/move, not individual re-links).
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either id is unknown (caller bug).
    pub fn connect(&mut self, a: ModuleId, b: ModuleId, face: Face, meta: ConnectionMeta) {
        self.graph.connect(a, b, face, meta);
        self.emit(WorldEvent::GraphChanged);
    }

    // ── Selection ───────────────────────────────────────────────

    /// Replace the selection. Emits `SelectionChanged`.
    ///
    /// # Panics
    ///
    /// Panics if any id is not a live module (caller bug: the selection
    /// UI can only pick from live modules).
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ModuleId>) {
        let selection: IndexSet<ModuleId> = ids.into_iter().collect();
        for &id in &selection {
            if !self.graph.contains(id) {
                panic!("set_selection: unknown module {id}");
            }
        }
        self.selection = selection;
        self.emit(WorldEvent::SelectionChanged {
            selected: self.selection.iter().copied().collect(),
        });
    }

    // ── Movement ────────────────────────────────────────────────

    /// Validate moving `selection` one cell through `dir`, and apply the
    /// move if it passes.
    ///
    /// On success every selected module is translated, the occupancy
    /// index is shifted, the move is recorded in history, and
    /// `MoveValidated` + `ModulesChanged` are emitted. On rejection
    /// nothing changes and `MoveRejected` carries the reason. Either way
    /// the receipt is returned.
    ///
    /// # Panics
    ///
    /// Panics on an empty selection, duplicate ids, or ids not in the
    /// session (see [`MovementValidator::validate`]).
    pub fn try_move(&mut self, selection: &[ModuleId], dir: Face) -> MoveReceipt {
        let receipt = MovementValidator::new(&self.graph, self.bounds).validate(selection, dir);
        if receipt.valid {
            debug!(selected = selection.len(), %dir, "move applied");
            self.shift_group(selection, dir);
            self.history.record(EditOp::MoveGroup {
                ids: selection.to_vec(),
                dir,
            });
            self.emit(WorldEvent::MoveValidated {
                moved: selection.to_vec(),
                dir,
            });
            self.emit(WorldEvent::ModulesChanged);
        } else if let Some(reason) = receipt.reason {
            debug!(%reason, "move rejected");
            self.emit(WorldEvent::MoveRejected { reason });
        }
        receipt
    }

    /// [`try_move`](Session::try_move) over the current selection.
    ///
    /// # Panics
    ///
    /// Panics if the selection is empty.
    pub fn try_move_selection(&mut self, dir: Face) -> MoveReceipt {
        let selection: Vec<ModuleId> = self.selection.iter().copied().collect();
        self.try_move(&selection, dir)
    }

    /// Translate a validated group and shift the occupancy index.
    fn shift_group(&mut self, ids: &[ModuleId], dir: Face) {
        let placements: Vec<(ModuleId, GridVec)> = ids
            .iter()
            .map(|&id| {
                let module = self
                    .graph
                    .get(id)
                    .expect("group move ids are live modules");
                (id, module.position())
            })
            .collect();
        for &id in ids {
            self.graph
                .get_mut(id)
                .expect("group move ids are live modules")
                .translate(dir.delta());
        }
        self.occupancy.apply_move(&placements, dir);
    }

    // ── Undo / redo ─────────────────────────────────────────────

    /// Revert the most recent recorded edit. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.pop_undo() else {
            return false;
        };
        self.revert(&op);
        self.history.push_redo(op);
        true
    }

    /// Replay the most recently undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.pop_redo() else {
            return false;
        };
        self.replay(&op);
        self.history.push_undo(op);
        true
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn revert(&mut self, op: &EditOp) {
        match op {
            EditOp::AddModule { module } => {
                let _ = self.graph.remove_module(module.id());
                self.selection.shift_remove(&module.id());
                self.rebuild_occupancy();
            }
            EditOp::RemoveModule { module } => {
                self.restore_module(module);
            }
            EditOp::MoveGroup { ids, dir } => {
                self.shift_group(ids, dir.opposite());
            }
        }
        self.emit(WorldEvent::ModulesChanged);
        self.emit(WorldEvent::GraphChanged);
    }

    fn replay(&mut self, op: &EditOp) {
        match op {
            EditOp::AddModule { module } => {
                self.graph.add_module(module.clone());
                self.autoconnect(module.id());
                self.rebuild_occupancy();
            }
            EditOp::RemoveModule { module } => {
                let _ = self.graph.remove_module(module.id());
                self.selection.shift_remove(&module.id());
                self.rebuild_occupancy();
            }
            EditOp::MoveGroup { ids, dir } => {
                self.shift_group(ids, *dir);
            }
        }
        self.emit(WorldEvent::ModulesChanged);
        self.emit(WorldEvent::GraphChanged);
    }

    /// Re-insert a removed module and re-link its surviving neighbours
    /// from the captured snapshot, keeping both link sides mirrored.
    fn restore_module(&mut self, snapshot: &Module) {
        let mut bare = Module::new(snapshot.id(), snapshot.position());
        bare.set_color(snapshot.color().map(String::from));
        bare.set_pinned(snapshot.pinned());
        bare.set_mass(snapshot.mass());
        self.graph.add_module(bare);

        for (face, link) in snapshot.links() {
            if self.graph.contains(link.to) {
                self.graph.connect(snapshot.id(), link.to, face, link.meta);
            }
        }
        self.rebuild_occupancy();
    }

    // ── Derived state upkeep ────────────────────────────────────

    /// Rigidly connect `id` to every geometrically adjacent module.
    fn autoconnect(&mut self, id: ModuleId) {
        let position = self
            .graph
            .get(id)
            .expect("autoconnect target was just inserted")
            .position();
        let occupancy = OccupancyIndex::build(self.graph.placements());
        for face in Face::ALL {
            if let Some(other) = occupancy.occupant_at(position + face.delta()) {
                self.graph.connect(id, other, face, ConnectionMeta::rigid());
            }
        }
    }

    fn rebuild_occupancy(&mut self) {
        let placements: Vec<(ModuleId, GridVec)> = self.graph.placements().collect();
        self.occupancy.rebuild(placements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbot_core::RejectReason;

    fn session() -> Session {
        let bounds = Bounds::new(
            GridVec::new(-500, -500, -500),
            GridVec::new(500, 500, 500),
        )
        .unwrap();
        Session::new(SessionConfig::new(bounds)).unwrap()
    }

    fn cell(x: i32, y: i32, z: i32) -> GridVec {
        GridVec::new(x * 50, y * 50, z * 50)
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn zero_history_limit_is_rejected() {
        let bounds = Bounds::new(GridVec::ZERO, GridVec::ZERO).unwrap();
        let config = SessionConfig {
            bounds,
            history_limit: 0,
        };
        assert_eq!(Session::new(config).unwrap_err(), SessionError::HistoryLimitZero);
    }

    // ── Placement ───────────────────────────────────────────────

    #[test]
    fn place_module_autoconnects_to_neighbours() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let b = s.place_module(cell(1, 0, 0));

        let mut graph = s.graph().clone();
        assert!(graph.same_component(a, b));
        assert_eq!(s.module(a).unwrap().neighbour(Face::PosX), Some(b));
        assert_eq!(s.module(b).unwrap().neighbour(Face::NegX), Some(a));
        assert!(s.is_occupied(cell(1, 0, 0)));
    }

    #[test]
    fn place_module_allocates_fresh_ids() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        s.remove_module(a);
        let b = s.place_module(cell(0, 0, 0));
        assert_ne!(a, b, "ids are never reused");
    }

    // ── Removal ─────────────────────────────────────────────────

    #[test]
    fn remove_module_clears_selection_and_occupancy() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        s.set_selection([a]);

        assert!(s.remove_module(a));
        assert!(s.selection().is_empty());
        assert!(!s.is_occupied(cell(0, 0, 0)));
        assert!(!s.remove_module(a), "second removal is a no-op");
    }

    // ── Movement ────────────────────────────────────────────────

    #[test]
    fn applied_move_updates_positions_and_occupancy() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let b = s.place_module(cell(1, 0, 0));

        let receipt = s.try_move(&[a, b], Face::PosY);
        assert!(receipt.valid);
        assert_eq!(s.module(a).unwrap().position(), cell(0, 1, 0));
        assert_eq!(s.module(b).unwrap().position(), cell(1, 1, 0));
        assert_eq!(s.occupant_at(cell(0, 1, 0)), Some(a));
        assert!(!s.is_occupied(cell(0, 0, 0)));
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let _b = s.place_module(cell(1, 0, 0));

        let receipt = s.try_move(&[a], Face::PosX);
        assert_eq!(receipt.reason, Some(RejectReason::Collision));
        assert_eq!(s.module(a).unwrap().position(), cell(0, 0, 0));
        assert_eq!(s.occupant_at(cell(0, 0, 0)), Some(a));
    }

    // ── Undo / redo ─────────────────────────────────────────────

    #[test]
    fn undo_and_redo_of_placement() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let b = s.place_module(cell(1, 0, 0));

        assert!(s.undo());
        assert!(s.module(b).is_none());
        assert_eq!(s.len(), 1);

        assert!(s.redo());
        assert_eq!(s.len(), 2);
        // Redo re-derives the rigid link geometrically.
        assert_eq!(s.module(a).unwrap().neighbour(Face::PosX), Some(b));
    }

    #[test]
    fn undo_of_removal_restores_links() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let b = s.place_module(cell(1, 0, 0));
        let c = s.place_module(cell(2, 0, 0));

        s.remove_module(b);
        let mut graph = s.graph().clone();
        assert!(!graph.same_component(a, c));

        assert!(s.undo());
        let mut graph = s.graph().clone();
        assert!(graph.same_component(a, c));
        assert_eq!(s.module(b).unwrap().neighbour(Face::PosX), Some(c));
        assert_eq!(s.module(c).unwrap().neighbour(Face::NegX), Some(b));
    }

    #[test]
    fn undo_of_move_shifts_group_back() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));

        assert!(s.try_move(&[a], Face::PosZ).valid);
        assert!(s.undo());
        assert_eq!(s.module(a).unwrap().position(), cell(0, 0, 0));
        assert_eq!(s.occupant_at(cell(0, 0, 0)), Some(a));

        assert!(s.redo());
        assert_eq!(s.module(a).unwrap().position(), cell(0, 0, 1));
    }

    #[test]
    fn new_edit_invalidates_redo() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        assert!(s.try_move(&[a], Face::PosX).valid);
        assert!(s.undo());
        assert!(s.can_redo());

        s.place_module(cell(0, 2, 0));
        assert!(!s.can_redo());
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut s = session();
        assert!(!s.undo());
        assert!(!s.redo());
    }

    // ── Events ──────────────────────────────────────────────────

    #[test]
    fn subscribers_receive_typed_events() {
        let mut s = session();
        let rx = s.subscribe();

        let a = s.place_module(cell(0, 0, 0));
        s.set_selection([a]);
        let receipt = s.try_move(&[a], Face::PosX);
        assert!(receipt.valid);

        let events: Vec<WorldEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                WorldEvent::ModulesChanged,
                WorldEvent::GraphChanged,
                WorldEvent::SelectionChanged { selected: vec![a] },
                WorldEvent::MoveValidated {
                    moved: vec![a],
                    dir: Face::PosX,
                },
                WorldEvent::ModulesChanged,
            ]
        );
    }

    #[test]
    fn rejected_move_emits_reason() {
        let mut s = session();
        let a = s.place_module(cell(0, 0, 0));
        let _b = s.place_module(cell(1, 0, 0));
        let rx = s.subscribe();

        s.try_move(&[a], Face::PosX);
        let events: Vec<WorldEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![WorldEvent::MoveRejected {
                reason: RejectReason::Collision,
            }]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut s = session();
        let rx = s.subscribe();
        drop(rx);
        // Emitting after the receiver is gone must not wedge the session.
        s.place_module(cell(0, 0, 0));
        assert_eq!(s.len(), 1);
    }

    #[test]
    #[should_panic(expected = "unknown module")]
    fn selecting_unknown_module_panics() {
        let mut s = session();
        s.set_selection([ModuleId(3)]);
    }
}
