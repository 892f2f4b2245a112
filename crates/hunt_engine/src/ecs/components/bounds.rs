//! Escape bounds component

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Sphere around the spawn point an entity must stay inside.
///
/// Leaving it counts as an escape: the bounds system destroys the entity and
/// reports it to the game-state collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeBoundsComponent {
    /// Where the entity was spawned
    pub spawn_position: Vec3,

    /// Largest allowed distance from `spawn_position`
    pub escape_distance: f32,
}

impl Component for EscapeBoundsComponent {}

impl EscapeBoundsComponent {
    /// Bounds anchored at `spawn_position`
    pub fn new(spawn_position: Vec3, escape_distance: f32) -> Self {
        Self {
            spawn_position,
            escape_distance,
        }
    }

    /// Strictly farther than `escape_distance` from the spawn point
    pub fn has_escaped(&self, position: Vec3) -> bool {
        (position - self.spawn_position).magnitude() > self.escape_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_inside() {
        let bounds = EscapeBoundsComponent::new(Vec3::zeros(), 10.0);
        assert!(!bounds.has_escaped(Vec3::new(10.0, 0.0, 0.0)));
        assert!(!bounds.has_escaped(Vec3::new(0.0, 9.99, 0.0)));
        assert!(bounds.has_escaped(Vec3::new(0.0, 0.0, 10.01)));
    }

    #[test]
    fn test_offset_spawn() {
        let bounds = EscapeBoundsComponent::new(Vec3::new(5.0, 5.0, 5.0), 1.0);
        assert!(!bounds.has_escaped(Vec3::new(5.5, 5.0, 5.0)));
        assert!(bounds.has_escaped(Vec3::zeros()));
    }
}
