//! Raycast source component
//!
//! Configures a ray cast from the owning entity's position and stores the
//! outcome of the most recent cast. The collision system writes the `last_*`
//! fields; everything else is input.

use super::movement::TranslationSpace;
use crate::ecs::{Component, Entity};
use crate::foundation::math::Vec3;

/// Entity that casts rays, e.g. a gun
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastSourceComponent {
    /// Cast direction
    pub direction: Vec3,

    /// Frame `direction` is read in
    pub space: TranslationSpace,

    /// Hits must be strictly closer than this
    pub max_distance: f32,

    /// Whether the last cast hit anything
    pub last_hit: bool,

    /// World-space point of the last hit
    pub last_hit_point: Vec3,

    /// Face normal of the last hit
    pub last_hit_normal: Vec3,

    /// Distance of the last hit
    pub last_distance: f32,

    /// Entity struck by the last cast
    pub hit_entity: Option<Entity>,
}

impl Component for RaycastSourceComponent {}

impl RaycastSourceComponent {
    /// Source casting along a world-space direction
    pub fn new(direction: Vec3, max_distance: f32) -> Self {
        Self {
            direction,
            space: TranslationSpace::World,
            max_distance,
            last_hit: false,
            last_hit_point: Vec3::zeros(),
            last_hit_normal: Vec3::zeros(),
            last_distance: 0.0,
            hit_entity: None,
        }
    }

    /// Source casting along the entity's own forward axis
    pub fn forward(max_distance: f32) -> Self {
        Self {
            space: TranslationSpace::Local,
            ..Self::new(Vec3::new(0.0, 0.0, -1.0), max_distance)
        }
    }

    /// Forget the previous result
    pub fn clear_hit(&mut self) {
        self.last_hit = false;
        self.last_hit_point = Vec3::zeros();
        self.last_hit_normal = Vec3::zeros();
        self.last_distance = 0.0;
        self.hit_entity = None;
    }
}
