//! The connectivity graph: module ownership plus union-find components.

use indexmap::IndexMap;
use voxbot_core::{ConnectionMeta, Face, GridVec, Module, ModuleId};

/// Connectivity graph over the module set, backed by union-find.
///
/// The graph owns the modules. Adding a module creates a singleton
/// component; [`connect`](ConnectivityGraph::connect) records a mirrored
/// link pair and merges the two components. Union-find has no split
/// primitive, so [`remove_module`](ConnectivityGraph::remove_module)
/// detaches the survivors' back-links and rebuilds the forest from the
/// remaining links — after removal the component structure is always
/// consistent, including splits.
///
/// Component queries take `&mut self` because `find` path-compresses as
/// it walks, keeping amortised lookups near O(1).
#[derive(Clone, Debug, Default)]
pub struct ConnectivityGraph {
    modules: IndexMap<ModuleId, Module>,
    parent: IndexMap<ModuleId, ModuleId>,
    size: IndexMap<ModuleId, usize>,
}

impl ConnectivityGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Union-find helpers ──────────────────────────────────────

    /// Find the component root of `id`, compressing the walked path.
    fn find(&mut self, id: ModuleId) -> ModuleId {
        let mut root = id;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }
        // Second pass: point every walked node straight at the root.
        let mut cur = id;
        while cur != root {
            let next = self.parent[&cur];
            self.parent.insert(cur, root);
            cur = next;
        }
        root
    }

    /// Merge the components of `a` and `b`, attaching the smaller root
    /// under the larger. No-op if already in the same component.
    fn union(&mut self, a: ModuleId, b: ModuleId) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.size[&ra] < self.size[&rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent.insert(rb, ra);
        let merged = self.size[&ra] + self.size[&rb];
        self.size.insert(ra, merged);
    }

    // ── Public API ──────────────────────────────────────────────

    /// Insert a module as a singleton component.
    ///
    /// No-op if a module with the same id is already present.
    pub fn add_module(&mut self, module: Module) {
        let id = module.id();
        if self.modules.contains_key(&id) {
            return;
        }
        self.modules.insert(id, module);
        self.parent.insert(id, id);
        self.size.insert(id, 1);
    }

    /// Record a bidirectional connection between `a` and `b`.
    ///
    /// Sets `a`'s link through `face` and `b`'s link through
    /// `face.opposite()` with identical metadata, then merges the two
    /// components.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either id is not in the graph — both are
    /// caller bugs, not recoverable domain states.
    pub fn connect(&mut self, a: ModuleId, b: ModuleId, face: Face, meta: ConnectionMeta) {
        if a == b {
            panic!("connect: cannot connect module {a} to itself");
        }
        let Some(module_a) = self.modules.get_mut(&a) else {
            panic!("connect: unknown module {a}");
        };
        module_a.set_link(face, b, meta);
        let Some(module_b) = self.modules.get_mut(&b) else {
            panic!("connect: unknown module {b}");
        };
        module_b.set_link(face.opposite(), a, meta);

        self.union(a, b);
    }

    /// Size of the connected component `id` belongs to.
    ///
    /// Returns 0 for unknown ids.
    pub fn component_size(&mut self, id: ModuleId) -> usize {
        if !self.parent.contains_key(&id) {
            return 0;
        }
        let root = self.find(id);
        self.size[&root]
    }

    /// Whether `a` and `b` are currently in the same component.
    ///
    /// Returns false if either id is unknown.
    pub fn same_component(&mut self, a: ModuleId, b: ModuleId) -> bool {
        if !self.parent.contains_key(&a) || !self.parent.contains_key(&b) {
            return false;
        }
        self.find(a) == self.find(b)
    }

    /// Remove a module, detaching survivors and splitting components.
    ///
    /// Every surviving neighbour's back-link at the mirrored face is
    /// cleared, then the union-find forest is rebuilt from the remaining
    /// links. Returns the removed module with its links still captured,
    /// so callers can restore it (and its connections) later.
    ///
    /// Returns `None` if the id is unknown.
    pub fn remove_module(&mut self, id: ModuleId) -> Option<Module> {
        let removed = self.modules.shift_remove(&id)?;

        for (face, link) in removed.links() {
            if let Some(neighbour) = self.modules.get_mut(&link.to) {
                if neighbour.neighbour(face.opposite()) == Some(id) {
                    neighbour.clear_link(face.opposite());
                }
            }
        }

        self.parent.shift_remove(&id);
        self.size.shift_remove(&id);
        self.rebuild_components();

        Some(removed)
    }

    /// Recompute the union-find forest from the recorded links.
    fn rebuild_components(&mut self) {
        self.parent.clear();
        self.size.clear();
        for &id in self.modules.keys() {
            self.parent.insert(id, id);
            self.size.insert(id, 1);
        }
        let edges: Vec<(ModuleId, ModuleId)> = self
            .modules
            .values()
            .flat_map(|m| {
                let from = m.id();
                m.links().map(move |(_, link)| (from, link.to))
            })
            .collect();
        for (a, b) in edges {
            // Mirrored pairs visit each edge twice; union is idempotent.
            if self.parent.contains_key(&b) {
                self.union(a, b);
            }
        }
    }

    /// The module with the given id, if present.
    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }

    /// Mutable access for same-crate callers (the session's move path).
    pub(crate) fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(&id)
    }

    /// Whether the graph contains `id`.
    pub fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    /// Iterate over the modules in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Iterate over `(id, position)` pairs — the shape the spatial
    /// indices build from.
    pub fn placements(&self) -> impl Iterator<Item = (ModuleId, GridVec)> + '_ {
        self.modules.values().map(|m| (m.id(), m.position()))
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph holds no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
