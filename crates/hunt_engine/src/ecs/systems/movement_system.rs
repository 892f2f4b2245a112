//! Kinematic movement
//!
//! `position += direction_in_world * speed * dt`, nothing else. The
//! translation space is read from the velocity component, so the same system
//! moves world-space ducks and local-space projectiles.

use crate::ecs::components::{TransformComponent, TranslationSpace, VelocityComponent};
use crate::ecs::World;
use crate::foundation::math::Vec3;

/// World-space direction of `velocity` for an entity at `transform`
pub fn world_direction(transform: &TransformComponent, velocity: &VelocityComponent) -> Vec3 {
    resolve_direction(transform, velocity.direction, velocity.space)
}

/// Express `direction` in world space
pub fn resolve_direction(
    transform: &TransformComponent,
    direction: Vec3,
    space: TranslationSpace,
) -> Vec3 {
    match space {
        TranslationSpace::World => direction,
        TranslationSpace::Local => transform.rotation * direction,
    }
}

/// Advance `transform` by one step of `velocity`. Pure: returns the new value.
///
/// With `face_movement` set, a world-space velocity also turns the transform to
/// face its direction of travel. Local-space velocities already move along the
/// entity's own axes and keep their orientation.
pub fn integrate(
    transform: &TransformComponent,
    velocity: &VelocityComponent,
    delta_time: f32,
) -> TransformComponent {
    let direction = world_direction(transform, velocity);
    let mut next = transform.clone();
    next.position += direction * velocity.speed * delta_time;

    if velocity.face_movement && velocity.space == TranslationSpace::World && velocity.is_moving()
    {
        next.look_along(direction);
    }
    next
}

/// Moves every entity holding a transform and a velocity
#[derive(Debug, Default)]
pub struct MovementSystem {
    disabled: bool,
}

impl MovementSystem {
    /// Create a new movement system
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Integrate all movers by `delta_time`. Returns how many entities moved.
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> usize {
        if self.disabled {
            return 0;
        }

        let mut moved = 0;
        for entity in world.entities_with::<(TransformComponent, VelocityComponent)>() {
            let Some(velocity) = world.get_component::<VelocityComponent>(entity).cloned() else {
                continue;
            };
            if !velocity.is_moving() {
                continue;
            }
            let Some(transform) = world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };
            *transform = integrate(transform, &velocity, delta_time);
            moved += 1;
        }
        moved
    }
}
