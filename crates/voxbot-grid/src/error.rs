//! Error types for spatial structures.

use std::fmt;
use voxbot_core::GridVec;

/// Errors arising from spatial structure construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A bounds cuboid whose minimum exceeds its maximum on some axis.
    InvalidBounds {
        /// The offending minimum corner.
        min: GridVec,
        /// The offending maximum corner.
        max: GridVec,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { min, max } => {
                write!(f, "bounds min {min} exceeds max {max} on some axis")
            }
        }
    }
}

impl std::error::Error for GridError {}
