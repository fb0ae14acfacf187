//! Strongly-typed module identifiers and their allocator.

use std::fmt;

/// Identifies a module within a session.
///
/// Module ids are positive integers, assigned monotonically and never
/// reused within a session. Id `0` is not a valid module id; allocation
/// starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u64);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ModuleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonic allocator for [`ModuleId`]s.
///
/// Owned by the session that creates modules — there is no ambient global
/// counter, so two sessions allocate independently. Ids are never reused:
/// removing a module does not return its id to the pool.
///
/// When a configuration is imported with explicit ids, call
/// [`bump_past`](ModuleIdAllocator::bump_past) for each imported id so
/// subsequent allocations continue above the highest id seen.
///
/// # Examples
///
/// ```
/// use voxbot_core::{ModuleId, ModuleIdAllocator};
///
/// let mut ids = ModuleIdAllocator::new();
/// assert_eq!(ids.next_id(), ModuleId(1));
/// assert_eq!(ids.next_id(), ModuleId(2));
///
/// ids.bump_past(ModuleId(10));
/// assert_eq!(ids.next_id(), ModuleId(11));
/// ```
#[derive(Clone, Debug)]
pub struct ModuleIdAllocator {
    next: u64,
}

impl ModuleIdAllocator {
    /// Create an allocator whose first id is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> ModuleId {
        let id = ModuleId(self.next);
        self.next += 1;
        id
    }

    /// Ensure all future allocations are strictly greater than `id`.
    ///
    /// No-op if the allocator is already past `id`.
    pub fn bump_past(&mut self, id: ModuleId) {
        if self.next <= id.0 {
            self.next = id.0 + 1;
        }
    }
}

impl Default for ModuleIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
