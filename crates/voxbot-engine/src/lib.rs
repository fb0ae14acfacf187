//! Connectivity graph, movement validation, and session orchestration
//! for voxbot modular-robot structures.
//!
//! The [`ConnectivityGraph`] owns the module set and tracks connected
//! components with a union-find forest. The [`MovementValidator`] decides
//! whether a proposed rigid-group translation is legal against a
//! point-in-time snapshot. The [`Session`] is the explicit owning context
//! that external collaborators mutate through — there is no ambient
//! global state — and it feeds typed [`WorldEvent`](voxbot_core::WorldEvent)s
//! to subscribers and an undo/redo [`History`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod graph;
pub mod history;
pub mod session;
pub mod validator;

pub use graph::ConnectivityGraph;
pub use history::{EditOp, History};
pub use session::{Session, SessionConfig, SessionError};
pub use validator::MovementValidator;
