//! Voxbot: a connectivity and movement-validation engine for
//! voxel-lattice modular robots.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all voxbot sub-crates. For most users, adding `voxbot` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use voxbot::prelude::*;
//!
//! // A workspace two cells around the origin on every axis.
//! let bounds = Bounds::new(
//!     GridVec::new(-100, -100, -100),
//!     GridVec::new(100, 100, 100),
//! ).unwrap();
//! let mut session = Session::new(SessionConfig::new(bounds)).unwrap();
//!
//! // Place two modules; they auto-connect through the shared face.
//! let a = session.place_module(GridVec::new(0, 0, 0));
//! let b = session.place_module(GridVec::new(50, 0, 0));
//!
//! // Moving the pair together is legal...
//! let receipt = session.try_move(&[a, b], Face::PosY);
//! assert!(receipt.valid);
//!
//! // ...but detaching one of them is not.
//! let receipt = session.try_move(&[a], Face::PosY);
//! assert_eq!(receipt.reason, Some(RejectReason::SystemSplit));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `voxbot-core` | IDs, grid math, modules, receipts, events |
//! | [`grid`] | `voxbot-grid` | Occupancy and adjacency indices, bounds |
//! | [`engine`] | `voxbot-engine` | Connectivity graph, validator, session, history |
//! | [`config`] | `voxbot-config` | Strict-schema JSON import/export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and events (`voxbot-core`).
///
/// Contains [`types::Module`], [`types::GridVec`], [`types::Face`],
/// connection metadata, movement receipts, and [`types::WorldEvent`].
pub use voxbot_core as types;

/// Derived spatial indices and workspace bounds (`voxbot-grid`).
///
/// Provides [`grid::OccupancyIndex`], [`grid::AdjacencyIndex`], and
/// [`grid::Bounds`].
pub use voxbot_grid as grid;

/// Connectivity graph, movement validation, session, history
/// (`voxbot-engine`).
///
/// [`engine::Session`] is the owning context most callers work through;
/// [`engine::MovementValidator`] can also be used standalone against a
/// graph snapshot.
pub use voxbot_engine as engine;

/// Strict-schema JSON import/export (`voxbot-config`).
///
/// Parse documents with [`config::parse_document`], build sessions with
/// [`config::import_str`], and write them back with
/// [`config::export_json`].
pub use voxbot_config as config;

/// Common imports for typical voxbot usage.
///
/// ```rust
/// use voxbot::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use voxbot_core::{
        ConnectionKind, ConnectionMeta, Face, GridVec, Link, Module, ModuleId, MoveReceipt,
        RailRole, RejectReason, WorldEvent, CELL,
    };

    // Spatial
    pub use voxbot_grid::{AdjacencyIndex, Bounds, OccupancyIndex};

    // Engine
    pub use voxbot_engine::{
        ConnectivityGraph, History, MovementValidator, Session, SessionConfig, SessionError,
    };

    // Configuration documents
    pub use voxbot_config::{export_json, import_str, ConfigDoc, ConfigError};
}
