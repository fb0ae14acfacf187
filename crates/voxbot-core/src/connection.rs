//! Connection metadata attached to module-to-module links.

use std::fmt;
use std::str::FromStr;

/// The mechanical kind of a connection between two module faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Fixed connection; the modules move as one rigid body.
    #[default]
    Rigid,
    /// Rotating connection around the shared face.
    Hinge,
    /// Rail/wagon pairing: one module carries a rail, the other rides it.
    RailWagon,
}

impl ConnectionKind {
    /// Wire spelling (`"rigid"`, `"hinge"`, `"rail-wagon"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            ConnectionKind::Rigid => "rigid",
            ConnectionKind::Hinge => "hinge",
            ConnectionKind::RailWagon => "rail-wagon",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`ConnectionKind`] from an unrecognised
/// spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseKindError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown connection type '{}', expected one of rigid, hinge, rail-wagon",
            self.input
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for ConnectionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rigid" => Ok(ConnectionKind::Rigid),
            "hinge" => Ok(ConnectionKind::Hinge),
            "rail-wagon" => Ok(ConnectionKind::RailWagon),
            _ => Err(ParseKindError {
                input: s.to_string(),
            }),
        }
    }
}

/// Which side of a rail/wagon pairing a module plays.
///
/// Only meaningful on [`ConnectionKind::RailWagon`] connections; carried
/// but not consumed by the movement validator (the rail-wagon
/// compatibility check is a placeholder).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailRole {
    /// This endpoint provides the rail.
    Rail,
    /// This endpoint rides the rail.
    Wagon,
}

impl RailRole {
    /// Wire spelling (`"rail"`, `"wagon"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            RailRole::Rail => "rail",
            RailRole::Wagon => "wagon",
        }
    }
}

impl fmt::Display for RailRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`RailRole`] from an unrecognised spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown connection mode '{}', expected rail or wagon",
            self.input
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for RailRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rail" => Ok(RailRole::Rail),
            "wagon" => Ok(RailRole::Wagon),
            _ => Err(ParseRoleError {
                input: s.to_string(),
            }),
        }
    }
}

/// Metadata describing one connection between two module faces.
///
/// Both endpoints of a connection carry identical metadata. The optional
/// fields are explicit here rather than a free-form property bag: absent
/// means "not specified", and export omits absent fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConnectionMeta {
    /// Mechanical kind. Defaults to [`ConnectionKind::Rigid`].
    pub kind: ConnectionKind,
    /// Rail/wagon role of the lower-id endpoint, if any.
    pub mode: Option<RailRole>,
    /// Connection strength in arbitrary units, if specified.
    pub strength: Option<f64>,
}

impl ConnectionMeta {
    /// A plain rigid connection with no mode or strength.
    pub const fn rigid() -> Self {
        Self {
            kind: ConnectionKind::Rigid,
            mode: None,
            strength: None,
        }
    }
}
