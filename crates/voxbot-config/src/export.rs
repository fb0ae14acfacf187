//! Document construction from a live session.

use voxbot_engine::Session;

use crate::error::ConfigError;
use crate::schema::{ConfigDoc, ConnectionEntry, ModuleEntry, PositionEntry};

/// Export the session's modules and connections as a document.
///
/// Modules are written in ascending id order. Each undirected connection
/// appears exactly once, from the lower-id endpoint's perspective: `from`
/// is the lower id and `dir` is that module's face toward the other. The
/// connection type is always written, defaulting to `"rigid"` for links
/// that never specified one; absent `mode` and `strength` stay absent.
pub fn export_document(session: &Session) -> ConfigDoc {
    let mut modules: Vec<_> = session.modules().collect();
    modules.sort_by_key(|m| m.id());

    let module_entries = modules
        .iter()
        .map(|m| {
            let position = m.position();
            ModuleEntry {
                id: m.id().0,
                position: PositionEntry {
                    x: position.x,
                    y: position.y,
                    z: position.z,
                },
                color: m.color().map(String::from),
                pinned: m.pinned().then_some(true),
                mass: m.mass(),
            }
        })
        .collect();

    let mut connections = Vec::new();
    for m in &modules {
        for (face, link) in m.links() {
            if m.id() > link.to {
                continue; // the lower-id endpoint writes the edge
            }
            connections.push(ConnectionEntry {
                from: m.id().0,
                to: link.to.0,
                dir: face.into(),
                kind: Some(link.meta.kind.into()),
                mode: link.meta.mode.map(Into::into),
                strength: link.meta.strength,
            });
        }
    }

    ConfigDoc {
        modules: module_entries,
        connections,
    }
}

/// Export the session as pretty-printed JSON.
pub fn export_json(session: &Session) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(&export_document(session))?)
}
