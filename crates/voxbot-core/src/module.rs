//! The [`Module`] entity: one unit-cube segment of a modular robot.

use crate::connection::ConnectionMeta;
use crate::grid::{Face, GridVec};
use crate::id::ModuleId;

/// A one-directional link from a module face to a neighbouring module.
///
/// Links come in mirrored pairs: if A's `+X` link points at B, B's `−X`
/// link points at A with the same metadata. The pairing is maintained by
/// the connectivity graph, not by the module itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// The neighbouring module on the other side of this face.
    pub to: ModuleId,
    /// Connection metadata, identical on both endpoints.
    pub meta: ConnectionMeta,
}

/// A single unit-cube module: grid position, per-face links, and inert
/// display attributes.
///
/// The display attributes (`color`, `pinned`, `mass`) are carried for
/// collaborators such as inspectors and exporters; the movement validator
/// never reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    id: ModuleId,
    position: GridVec,
    links: [Option<Link>; 6],
    color: Option<String>,
    pinned: bool,
    mass: Option<f64>,
}

impl Module {
    /// Create an unlinked module at `position`.
    pub fn new(id: ModuleId, position: GridVec) -> Self {
        Self {
            id,
            position,
            links: [None; 6],
            color: None,
            pinned: false,
            mass: None,
        }
    }

    /// This module's id.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Current grid position.
    pub fn position(&self) -> GridVec {
        self.position
    }

    /// Shift the module by a grid-aligned delta.
    ///
    /// Translation is purely spatial: links are **not** touched, so a
    /// move-in-progress cannot corrupt the connectivity graph. Callers
    /// that change positions must rebuild the derived spatial indices
    /// afterwards.
    pub fn translate(&mut self, delta: GridVec) {
        self.position = self.position + delta;
    }

    /// The link through `face`, if any.
    pub fn link(&self, face: Face) -> Option<&Link> {
        self.links[face.index()].as_ref()
    }

    /// The id of the neighbour through `face`, if any.
    pub fn neighbour(&self, face: Face) -> Option<ModuleId> {
        self.links[face.index()].map(|l| l.to)
    }

    /// Set the link through `face`, replacing any existing one.
    ///
    /// One-directional: to preserve the mirrored-pair invariant the caller
    /// must also set the opposite face on the other endpoint (the
    /// connectivity graph's `connect` does both sides).
    pub fn set_link(&mut self, face: Face, to: ModuleId, meta: ConnectionMeta) {
        self.links[face.index()] = Some(Link { to, meta });
    }

    /// Clear the link through `face`, returning it if one was present.
    ///
    /// One-directional, like [`set_link`](Module::set_link).
    pub fn clear_link(&mut self, face: Face) -> Option<Link> {
        self.links[face.index()].take()
    }

    /// Iterate over the occupied faces and their links.
    pub fn links(&self) -> impl Iterator<Item = (Face, &Link)> {
        Face::ALL
            .iter()
            .filter_map(move |&face| self.links[face.index()].as_ref().map(|l| (face, l)))
    }

    /// Number of linked faces.
    pub fn link_count(&self) -> usize {
        self.links.iter().filter(|l| l.is_some()).count()
    }

    /// Display colour, if set.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Set or clear the display colour.
    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    /// Whether the module is pinned in the editor.
    pub fn pinned(&self) -> bool {
        self.pinned
    }

    /// Set the pinned flag.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Mass in arbitrary units, if specified.
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// Set or clear the mass.
    pub fn set_mass(&mut self, mass: Option<f64>) {
        self.mass = mass;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionKind;

    fn module(id: u64, x: i32, y: i32, z: i32) -> Module {
        Module::new(ModuleId(id), GridVec::new(x, y, z))
    }

    #[test]
    fn new_module_has_no_links() {
        let m = module(1, 0, 0, 0);
        assert_eq!(m.link_count(), 0);
        for face in Face::ALL {
            assert!(m.link(face).is_none());
        }
    }

    #[test]
    fn translate_moves_position_only() {
        let mut m = module(1, 0, 0, 0);
        m.set_link(Face::PosX, ModuleId(2), ConnectionMeta::rigid());

        m.translate(Face::PosY.delta());

        assert_eq!(m.position(), GridVec::new(0, 50, 0));
        // Links are untouched by translation.
        assert_eq!(m.neighbour(Face::PosX), Some(ModuleId(2)));
    }

    #[test]
    fn set_and_clear_link() {
        let mut m = module(1, 0, 0, 0);
        let meta = ConnectionMeta {
            kind: ConnectionKind::Hinge,
            mode: None,
            strength: Some(2.5),
        };
        m.set_link(Face::NegZ, ModuleId(9), meta);

        assert_eq!(m.link_count(), 1);
        assert_eq!(m.link(Face::NegZ).unwrap().meta, meta);

        let cleared = m.clear_link(Face::NegZ).unwrap();
        assert_eq!(cleared.to, ModuleId(9));
        assert_eq!(m.link_count(), 0);
        assert!(m.clear_link(Face::NegZ).is_none());
    }

    #[test]
    fn links_iterates_occupied_faces_in_order() {
        let mut m = module(1, 0, 0, 0);
        m.set_link(Face::PosZ, ModuleId(3), ConnectionMeta::rigid());
        m.set_link(Face::NegX, ModuleId(2), ConnectionMeta::rigid());

        let faces: Vec<Face> = m.links().map(|(f, _)| f).collect();
        assert_eq!(faces, vec![Face::NegX, Face::PosZ]);
    }

    #[test]
    fn display_attributes_are_carried() {
        let mut m = module(4, 50, 0, 0);
        m.set_color(Some("#ff8800".to_string()));
        m.set_pinned(true);
        m.set_mass(Some(1.5));

        assert_eq!(m.color(), Some("#ff8800"));
        assert!(m.pinned());
        assert_eq!(m.mass(), Some(1.5));
    }
}
