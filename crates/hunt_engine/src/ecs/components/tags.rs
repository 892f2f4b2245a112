//! Gameplay tag component

use crate::ecs::Component;
use bitflags::bitflags;

bitflags! {
    /// Gameplay categories an entity belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntityTags: u32 {
        /// Shootable target
        const DUCK = 1 << 0;
        /// Raycast source controlled by the player
        const GUN = 1 << 1;
        /// Static scenery
        const ENVIRONMENT = 1 << 2;
        /// Target worth no points
        const DECOY = 1 << 3;
    }
}

/// Tag set attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagComponent(pub EntityTags);

impl Component for TagComponent {}

impl TagComponent {
    /// Whether every flag in `tags` is set
    pub fn has(&self, tags: EntityTags) -> bool {
        self.0.contains(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_requires_all_flags() {
        let tag = TagComponent(EntityTags::DUCK | EntityTags::DECOY);
        assert!(tag.has(EntityTags::DUCK));
        assert!(tag.has(EntityTags::DUCK | EntityTags::DECOY));
        assert!(!tag.has(EntityTags::DUCK | EntityTags::GUN));
    }
}
