//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Entities own no data; every piece of state lives in a component storage
/// keyed by this id. Ids are handed out monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u64,
}

impl Entity {
    /// Sentinel meaning "no entity". Never returned by the allocator.
    pub const INVALID: Self = Self { id: 0 };

    /// Create a new entity with the given ID
    pub(crate) const fn new(id: u64) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Whether this is a real handle rather than [`Entity::INVALID`]
    pub const fn is_valid(&self) -> bool {
        self.id != 0
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Hands out fresh entity ids.
#[derive(Debug)]
pub(crate) struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    pub(crate) const fn new() -> Self {
        // 0 is reserved for Entity::INVALID
        Self { next_id: 1 }
    }

    pub(crate) fn allocate(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        entity
    }

    /// Number of ids handed out so far
    pub(crate) const fn allocated(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
