//! Error types for configuration import and export.

use std::error::Error;
use std::fmt;

use voxbot_engine::SessionError;

/// Errors raised while importing or exporting a configuration document.
///
/// Import is all-or-nothing: the first violation aborts the whole
/// operation and no partial session is built. Each variant names the
/// offending module or connection so the caller can surface a precise
/// diagnostic.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema
    /// (wrong type, missing field, unknown property, invalid enum
    /// spelling). The wrapped error carries the serde diagnostic.
    Json(serde_json::Error),
    /// The `modules` array is empty.
    EmptyModules,
    /// A module id of 0 — ids are positive integers.
    InvalidModuleId {
        /// The offending id.
        id: u64,
    },
    /// Two modules share an id.
    DuplicateModuleId {
        /// The duplicated id.
        id: u64,
    },
    /// A connection endpoint references a module that does not exist.
    UnknownEndpoint {
        /// Zero-based index of the connection in the document.
        connection: usize,
        /// The dangling id.
        id: u64,
    },
    /// A connection joins a module to itself.
    SelfConnection {
        /// Zero-based index of the connection in the document.
        connection: usize,
        /// The id on both ends.
        id: u64,
    },
    /// The session configuration was itself invalid.
    Session(SessionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "configuration does not match the schema: {err}"),
            Self::EmptyModules => write!(f, "\"modules\" must contain at least one module"),
            Self::InvalidModuleId { id } => {
                write!(f, "module id must be a positive integer, found {id}")
            }
            Self::DuplicateModuleId { id } => write!(f, "duplicate module id {id}"),
            Self::UnknownEndpoint { connection, id } => {
                write!(f, "connection {connection} references unknown module id {id}")
            }
            Self::SelfConnection { connection, id } => {
                write!(f, "connection {connection} joins module {id} to itself")
            }
            Self::Session(err) => write!(f, "invalid session configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
