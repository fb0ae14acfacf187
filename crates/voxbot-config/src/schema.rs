//! Wire types for the configuration document.
//!
//! Every struct carries `deny_unknown_fields`, so a document with an
//! unsupported property anywhere fails to parse with a diagnostic naming
//! the property — the schema is closed, not extensible.

use serde::{Deserialize, Serialize};
use voxbot_core::{ConnectionKind, Face, RailRole};

/// The root configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDoc {
    /// All modules in the structure.
    pub modules: Vec<ModuleEntry>,
    /// Explicit connections between modules. Optional on import.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<ConnectionEntry>,
}

/// One module: id, grid position, and optional display attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    /// Unique positive integer id.
    pub id: u64,
    /// Grid position in source units.
    pub position: PositionEntry,
    /// Display colour, e.g. `"#ff8800"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Whether the module is pinned in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    /// Mass in arbitrary units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
}

/// A grid position. Components are integers in source units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionEntry {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
}

/// One undirected connection, written from the `from` endpoint's
/// perspective: `dir` is the face of `from` that touches `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionEntry {
    /// Id of the first endpoint (the lower id on export).
    pub from: u64,
    /// Id of the second endpoint.
    pub to: u64,
    /// Face of `from` through which the connection runs.
    pub dir: DirEntry,
    /// Connection type. Absent means rigid; export always writes it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindEntry>,
    /// Rail/wagon role of the `from` endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeEntry>,
    /// Connection strength.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

/// Wire spelling of a face direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirEntry {
    /// `+X`
    #[serde(rename = "posX")]
    PosX,
    /// `−X`
    #[serde(rename = "negX")]
    NegX,
    /// `+Y`
    #[serde(rename = "posY")]
    PosY,
    /// `−Y`
    #[serde(rename = "negY")]
    NegY,
    /// `+Z`
    #[serde(rename = "posZ")]
    PosZ,
    /// `−Z`
    #[serde(rename = "negZ")]
    NegZ,
}

impl From<DirEntry> for Face {
    fn from(dir: DirEntry) -> Face {
        match dir {
            DirEntry::PosX => Face::PosX,
            DirEntry::NegX => Face::NegX,
            DirEntry::PosY => Face::PosY,
            DirEntry::NegY => Face::NegY,
            DirEntry::PosZ => Face::PosZ,
            DirEntry::NegZ => Face::NegZ,
        }
    }
}

impl From<Face> for DirEntry {
    fn from(face: Face) -> DirEntry {
        match face {
            Face::PosX => DirEntry::PosX,
            Face::NegX => DirEntry::NegX,
            Face::PosY => DirEntry::PosY,
            Face::NegY => DirEntry::NegY,
            Face::PosZ => DirEntry::PosZ,
            Face::NegZ => DirEntry::NegZ,
        }
    }
}

/// Wire spelling of a connection type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindEntry {
    /// `"rigid"`
    #[serde(rename = "rigid")]
    Rigid,
    /// `"hinge"`
    #[serde(rename = "hinge")]
    Hinge,
    /// `"rail-wagon"`
    #[serde(rename = "rail-wagon")]
    RailWagon,
}

impl From<KindEntry> for ConnectionKind {
    fn from(kind: KindEntry) -> ConnectionKind {
        match kind {
            KindEntry::Rigid => ConnectionKind::Rigid,
            KindEntry::Hinge => ConnectionKind::Hinge,
            KindEntry::RailWagon => ConnectionKind::RailWagon,
        }
    }
}

impl From<ConnectionKind> for KindEntry {
    fn from(kind: ConnectionKind) -> KindEntry {
        match kind {
            ConnectionKind::Rigid => KindEntry::Rigid,
            ConnectionKind::Hinge => KindEntry::Hinge,
            ConnectionKind::RailWagon => KindEntry::RailWagon,
        }
    }
}

/// Wire spelling of a rail/wagon role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeEntry {
    /// `"rail"`
    #[serde(rename = "rail")]
    Rail,
    /// `"wagon"`
    #[serde(rename = "wagon")]
    Wagon,
}

impl From<ModeEntry> for RailRole {
    fn from(mode: ModeEntry) -> RailRole {
        match mode {
            ModeEntry::Rail => RailRole::Rail,
            ModeEntry::Wagon => RailRole::Wagon,
        }
    }
}

impl From<RailRole> for ModeEntry {
    fn from(role: RailRole) -> ModeEntry {
        match role {
            RailRole::Rail => ModeEntry::Rail,
            RailRole::Wagon => ModeEntry::Wagon,
        }
    }
}
