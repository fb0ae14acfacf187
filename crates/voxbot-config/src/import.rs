//! Parsing, semantic validation, and session construction from documents.

use std::collections::HashSet;

use tracing::warn;
use voxbot_core::{ConnectionMeta, GridVec, Module, ModuleId};
use voxbot_engine::{Session, SessionConfig};

use crate::error::ConfigError;
use crate::schema::ConfigDoc;

/// Parse a JSON string against the strict schema.
///
/// Structural problems — invalid JSON, wrong types, missing required
/// fields, unknown properties, unrecognised enum spellings — surface as
/// [`ConfigError::Json`] with the serde diagnostic. Semantic rules are
/// checked separately by [`validate_document`].
pub fn parse_document(json: &str) -> Result<ConfigDoc, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Check the semantic rules a structurally valid document must satisfy:
/// at least one module, unique positive ids, and connection endpoints
/// that reference existing, distinct modules.
pub fn validate_document(doc: &ConfigDoc) -> Result<(), ConfigError> {
    if doc.modules.is_empty() {
        return Err(ConfigError::EmptyModules);
    }

    let mut ids = HashSet::with_capacity(doc.modules.len());
    for module in &doc.modules {
        if module.id == 0 {
            return Err(ConfigError::InvalidModuleId { id: module.id });
        }
        if !ids.insert(module.id) {
            return Err(ConfigError::DuplicateModuleId { id: module.id });
        }
    }

    for (index, conn) in doc.connections.iter().enumerate() {
        if conn.from == conn.to {
            return Err(ConfigError::SelfConnection {
                connection: index,
                id: conn.from,
            });
        }
        for endpoint in [conn.from, conn.to] {
            if !ids.contains(&endpoint) {
                return Err(ConfigError::UnknownEndpoint {
                    connection: index,
                    id: endpoint,
                });
            }
        }
    }
    Ok(())
}

/// Build a fresh session from a validated document.
///
/// All-or-nothing: validation runs first, so a bad document leaves no
/// half-built session behind. Modules keep their declared ids (the
/// session's allocator continues above the highest), and connections are
/// applied with their declared face and metadata.
pub fn build_session(doc: &ConfigDoc, config: SessionConfig) -> Result<Session, ConfigError> {
    validate_document(doc)?;
    let mut session = Session::new(config).map_err(ConfigError::Session)?;

    for entry in &doc.modules {
        let position = GridVec::new(entry.position.x, entry.position.y, entry.position.z);
        let mut module = Module::new(ModuleId(entry.id), position);
        module.set_color(entry.color.clone());
        module.set_pinned(entry.pinned.unwrap_or(false));
        module.set_mass(entry.mass);
        session.insert_module(module);
    }

    for entry in &doc.connections {
        let meta = ConnectionMeta {
            kind: entry.kind.map(Into::into).unwrap_or_default(),
            mode: entry.mode.map(Into::into),
            strength: entry.strength,
        };
        session.connect(
            ModuleId(entry.from),
            ModuleId(entry.to),
            entry.dir.into(),
            meta,
        );
    }

    Ok(session)
}

/// Parse and import a JSON configuration in one step.
pub fn import_str(json: &str, config: SessionConfig) -> Result<Session, ConfigError> {
    let doc = parse_document(json).inspect_err(|err| {
        warn!(%err, "configuration rejected");
    })?;
    let session = build_session(&doc, config).inspect_err(|err| {
        warn!(%err, "configuration rejected");
    })?;
    Ok(session)
}
