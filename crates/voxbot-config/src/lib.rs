//! Strict-schema JSON import/export for voxbot module configurations.
//!
//! The document format is a JSON object with a `modules` array and an
//! optional `connections` array. The schema is strict: unknown properties
//! anywhere are rejected, ids must be unique positive integers, and every
//! connection endpoint must reference an existing module. Import is
//! all-or-nothing — any violation aborts with a diagnostic naming the
//! offending module or connection, and no partial session is built.
//!
//! Export produces the same shape: modules with their positions and
//! present display attributes, and each undirected connection exactly
//! once, written from the lower-id endpoint's perspective with the
//! connection type spelled out (`"rigid"` when it was never specified).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod import;
pub mod schema;

pub use error::ConfigError;
pub use export::{export_document, export_json};
pub use import::{build_session, import_str, parse_document, validate_document};
pub use schema::{ConfigDoc, ConnectionEntry, DirEntry, KindEntry, ModeEntry, ModuleEntry, PositionEntry};
