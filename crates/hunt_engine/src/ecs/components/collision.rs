//! Box collider component
//!
//! Colliders are axis-aligned in world space: the entity's scale stretches
//! them, its rotation does not.

use crate::ecs::components::TransformComponent;
use crate::ecs::Component;
use crate::foundation::math::{utils, Vec3};
use crate::physics::Aabb;

/// Axis-aligned box attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct BoxColliderComponent {
    /// Offset of the box center from the entity position, in local units
    pub center: Vec3,

    /// Half the box size along each axis, in local units
    pub half_extents: Vec3,

    /// Trigger volumes are reported by queries like solid boxes; the flag is
    /// for gameplay code to tell them apart
    pub is_trigger: bool,
}

impl Component for BoxColliderComponent {}

impl BoxColliderComponent {
    /// Solid box centered on the entity
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            center: Vec3::zeros(),
            half_extents: utils::abs(half_extents),
            is_trigger: false,
        }
    }

    /// Solid box from its full size
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size * 0.5)
    }

    /// Builder pattern: offset the box from the entity origin
    #[must_use]
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Builder pattern: mark as trigger volume
    #[must_use]
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// World-space box for an entity at `transform`
    pub fn world_aabb(&self, transform: &TransformComponent) -> Aabb {
        let scale = utils::abs(transform.scale);
        let center = transform.position + self.center.component_mul(&scale);
        Aabb::from_center_half_extents(center, self.half_extents.component_mul(&scale))
    }
}

impl Default for BoxColliderComponent {
    fn default() -> Self {
        Self::new(Vec3::new(0.5, 0.5, 0.5))
    }
}
