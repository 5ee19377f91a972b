//! Session-unique object identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide allocator; ids are never reused within a session.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a placed object.
///
/// Allocated once when the object is added and never mutated afterwards. The
/// scene graph, the picking resolver and the gizmo all address nodes by this
/// value, so it doubles as the join key between the store and the viewport.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh id
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw value (for scripts and tests that name ids explicitly)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<EntityId> = (0..64).map(|_| EntityId::new()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_ids_increase() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert!(id2 > id1);
    }

    #[test]
    fn test_from_raw_and_display() {
        let id = EntityId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "obj-42");
    }
}
