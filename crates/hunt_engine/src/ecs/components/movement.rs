//! Velocity component for entities that translate each frame
//!
//! Motion is kinematic: a direction and a scalar speed, no mass and no
//! acceleration. Whether the direction is read in world space or in the
//! entity's own frame is an explicit [`TranslationSpace`] on the component.

use crate::ecs::Component;
use crate::foundation::math::{utils, Vec3};
use serde::{Deserialize, Serialize};

/// Frame a direction vector is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslationSpace {
    /// Added to the position as-is, ignoring orientation
    #[default]
    World,
    /// Rotated by the entity's orientation before being added
    Local,
}

/// Component for entities that move
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityComponent {
    /// Unit direction of travel, zero when stationary
    pub direction: Vec3,

    /// Units per second along `direction`
    pub speed: f32,

    /// Frame `direction` is read in
    pub space: TranslationSpace,

    /// Turn the transform to face the world-space direction of travel
    pub face_movement: bool,
}

impl Component for VelocityComponent {}

impl Default for VelocityComponent {
    fn default() -> Self {
        Self::stationary()
    }
}

impl VelocityComponent {
    /// Velocity with a world-space direction. A zero direction means no motion.
    pub fn new(direction: Vec3, speed: f32) -> Self {
        Self {
            direction: utils::try_direction(direction).unwrap_or_else(Vec3::zeros),
            speed,
            space: TranslationSpace::World,
            face_movement: false,
        }
    }

    /// Velocity whose direction is read in the entity's own frame
    pub fn local(direction: Vec3, speed: f32) -> Self {
        Self {
            space: TranslationSpace::Local,
            ..Self::new(direction, speed)
        }
    }

    /// No motion
    pub fn stationary() -> Self {
        Self {
            direction: Vec3::zeros(),
            speed: 0.0,
            space: TranslationSpace::World,
            face_movement: false,
        }
    }

    /// Builder pattern: rotate to face the direction of travel
    #[must_use]
    pub fn facing_movement(mut self) -> Self {
        self.face_movement = true;
        self
    }

    /// Replace direction and speed, keeping the translation space
    pub fn set(&mut self, direction: Vec3, speed: f32) {
        self.direction = utils::try_direction(direction).unwrap_or_else(Vec3::zeros);
        self.speed = speed;
    }

    /// Zero the speed, keeping the direction for later inspection
    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Whether this velocity would move anything
    pub fn is_moving(&self) -> bool {
        self.speed != 0.0 && self.direction != Vec3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_direction() {
        let velocity = VelocityComponent::new(Vec3::new(3.0, 0.0, 4.0), 2.0);
        assert_relative_eq!(velocity.direction, Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);
        assert_eq!(velocity.space, TranslationSpace::World);
        assert!(velocity.is_moving());
    }

    #[test]
    fn test_zero_direction_is_stationary() {
        let velocity = VelocityComponent::new(Vec3::zeros(), 5.0);
        assert_eq!(velocity.direction, Vec3::zeros());
        assert!(!velocity.is_moving());
    }

    #[test]
    fn test_local_constructor_sets_space() {
        let velocity = VelocityComponent::local(Vec3::new(0.0, 0.0, -1.0), 1.0).facing_movement();
        assert_eq!(velocity.space, TranslationSpace::Local);
        assert!(velocity.face_movement);
    }

    #[test]
    fn test_stop_keeps_direction() {
        let mut velocity = VelocityComponent::new(Vec3::x(), 4.0);
        velocity.stop();
        assert_eq!(velocity.speed, 0.0);
        assert_eq!(velocity.direction, Vec3::x());
        assert!(!velocity.is_moving());
    }
}
