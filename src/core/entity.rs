//! Entity identification system.
//!
//! Every simulated object (island or ship) has a unique `EntityId` in
//! addition to its display name. Names are what users type; ids are what
//! the simulation stores whenever one object refers to another.
//!
//! ## Handles, not pointers
//!
//! A ship's attack target, a tanker's cargo islands, and a cruise ship's
//! tour path are all stored as `EntityId`s. The registry allocates ids from
//! a monotonic counter and never reuses one, so a handle to a removed ship
//! resolves to "absent" rather than to whatever was registered later.
//!
//! ```
//! use fleet_sim::core::EntityId;
//!
//! let ajax = EntityId::new(4);
//! assert_eq!(ajax.raw(), 4);
//! assert_eq!(ajax.next(), EntityId::new(5));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl Default for EntityId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl EntityId {
    /// The first id handed out by a fresh registry.
    pub const FIRST: EntityId = EntityId(0);

    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What kind of object an id refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Island,
    Ship,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence() {
        let a = EntityId::FIRST;
        let b = a.next();
        let c = b.next();

        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(c.raw(), 2);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(EntityId::from(7), EntityId::new(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
