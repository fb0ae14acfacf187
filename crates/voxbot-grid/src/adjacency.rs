//! Geometric adjacency index: module → face-adjacent modules.

use crate::occupancy::OccupancyIndex;
use indexmap::IndexMap;
use smallvec::SmallVec;
use voxbot_core::{Face, GridVec, ModuleId};

/// Maps each module to the modules occupying its six face-adjacent cells.
///
/// Purely geometric: two modules are adjacent when their cells are one
/// unit apart along a single axis, whether or not a connection link has
/// been registered between them. The movement validator deliberately uses
/// this view, not the logical-link view, for its connectivity checks — a
/// freshly placed module is adjacent to its neighbours before any
/// `connect` call.
///
/// There is no incremental-update contract: a group move changes many
/// positions at once, so the index is rebuilt wholesale whenever any
/// position or the module set changes.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    edges: IndexMap<ModuleId, SmallVec<[ModuleId; 6]>>,
}

impl AdjacencyIndex {
    /// Build the index from `(id, position)` pairs.
    pub fn build(modules: impl IntoIterator<Item = (ModuleId, GridVec)>) -> Self {
        let placements: Vec<(ModuleId, GridVec)> = modules.into_iter().collect();
        let occupancy = OccupancyIndex::build(placements.iter().copied());

        let mut edges = IndexMap::with_capacity(placements.len());
        for &(id, pos) in &placements {
            let mut neighbours = SmallVec::new();
            for face in Face::ALL {
                if let Some(other) = occupancy.occupant_at(pos + face.delta()) {
                    neighbours.push(other);
                }
            }
            edges.insert(id, neighbours);
        }
        Self { edges }
    }

    /// The modules geometrically adjacent to `id`, in face order.
    ///
    /// Empty for unknown ids.
    pub fn neighbours(&self, id: ModuleId) -> &[ModuleId] {
        self.edges.get(&id).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Whether the index has an entry for `id`.
    pub fn contains(&self, id: ModuleId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Number of indexed modules.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
