//! Derived spatial indices for voxbot modular-robot structures.
//!
//! Both indices here are pure derived state: rebuildable at any time from
//! the module set alone, and never the source of truth. The
//! [`OccupancyIndex`] answers "which module sits in this cell" in O(1);
//! the [`AdjacencyIndex`] answers "which modules sit in the six cells
//! around this one". [`Bounds`] describes the inclusive workspace cuboid
//! that group moves must stay inside.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod bounds;
pub mod error;
pub mod occupancy;

pub use adjacency::AdjacencyIndex;
pub use bounds::Bounds;
pub use error::GridError;
pub use occupancy::OccupancyIndex;
