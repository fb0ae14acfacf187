//! World events delivered to registered collaborators.

use crate::grid::Face;
use crate::id::ModuleId;
use crate::receipt::RejectReason;

/// A state-change notification emitted by the session.
///
/// Collaborators (graph visualisers, inspector panels) subscribe to a
/// channel of these and re-render from session state on receipt. The
/// events carry just enough payload to decide what to refresh; they are
/// not a replay log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    /// The module set changed: a module was added or removed.
    ModulesChanged,
    /// Connectivity changed: links were created or severed.
    GraphChanged,
    /// The selection was replaced.
    SelectionChanged {
        /// The ids now selected, in selection order.
        selected: Vec<ModuleId>,
    },
    /// A group move passed validation and was applied.
    MoveValidated {
        /// The ids that moved.
        moved: Vec<ModuleId>,
        /// The direction they moved in.
        dir: Face,
    },
    /// A group move was rejected; nothing changed.
    MoveRejected {
        /// The first violated rule.
        reason: RejectReason,
    },
}
