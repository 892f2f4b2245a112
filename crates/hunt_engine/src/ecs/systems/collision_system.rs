//! Spatial queries over box colliders
//!
//! Brute force: every query scans all live entities holding a transform and
//! a [`BoxColliderComponent`]. At the entity counts of a shooting gallery an
//! acceleration structure costs more than it saves.
//!
//! Nearest-hit law: a candidate wins only if its distance is strictly below
//! both the caller's `max_distance` and the best distance so far, so on equal
//! distances the first entity in scan order is kept.

use super::movement_system::resolve_direction;
use crate::ecs::components::{BoxColliderComponent, RaycastSourceComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::{Aabb, Ray, RAY_PARALLEL_EPSILON};

/// Nearest collider struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Entity that owns the struck collider
    pub entity: Entity,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Axis-aligned face normal
    pub normal: Vec3,
}

/// Ray and box queries against the world's colliders
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    parallel_epsilon: f32,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(RAY_PARALLEL_EPSILON)
    }
}

impl CollisionSystem {
    /// Create a collision system with the given slab-parallel threshold
    pub fn new(parallel_epsilon: f32) -> Self {
        Self { parallel_epsilon }
    }

    /// Slab-parallel threshold in use
    pub fn parallel_epsilon(&self) -> f32 {
        self.parallel_epsilon
    }

    /// Nearest collider hit by `ray` closer than `max_distance`, skipping
    /// `exclude`'s own collider.
    pub fn raycast(
        &self,
        world: &World,
        ray: &Ray,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RaycastHit> {
        let mut best: Option<RaycastHit> = None;

        for entity in world.entities_with::<(TransformComponent, BoxColliderComponent)>() {
            if Some(entity) == exclude {
                continue;
            }
            let Some(aabb) = world_aabb(world, entity) else {
                continue;
            };
            let Some(hit) = aabb.intersect_ray_with_epsilon(ray, self.parallel_epsilon) else {
                continue;
            };

            let closer = best.map_or(true, |current| hit.distance < current.distance);
            if hit.distance < max_distance && closer {
                best = Some(RaycastHit {
                    entity,
                    distance: hit.distance,
                    point: hit.point,
                    normal: hit.normal,
                });
            }
        }

        best
    }

    /// Cast the ray configured on `entity`'s [`RaycastSourceComponent`] from
    /// its position and store the outcome back on that component.
    ///
    /// The entity's own collider never counts. Missing components make this a
    /// no-op returning `None`; a zero-length direction records a miss.
    pub fn raycast_from_entity(&self, world: &mut World, entity: Entity) -> Option<RaycastHit> {
        let (Some(transform), Some(source)) = (
            world.get_component::<TransformComponent>(entity),
            world.get_component::<RaycastSourceComponent>(entity),
        ) else {
            log::debug!("{entity} cannot cast: needs a transform and a raycast source");
            return None;
        };

        let direction = resolve_direction(transform, source.direction, source.space);
        let max_distance = source.max_distance;
        let hit = Ray::new(transform.position, direction)
            .and_then(|ray| self.raycast(world, &ray, max_distance, Some(entity)));

        if let Some(source) = world.get_component_mut::<RaycastSourceComponent>(entity) {
            match hit {
                Some(hit) => {
                    source.last_hit = true;
                    source.last_hit_point = hit.point;
                    source.last_hit_normal = hit.normal;
                    source.last_distance = hit.distance;
                    source.hit_entity = Some(hit.entity);
                }
                None => source.clear_hit(),
            }
        }

        hit
    }

    /// Every live entity whose collider overlaps the box `min..max`,
    /// boundaries included. No ordering guarantee.
    pub fn box_overlap(&self, world: &World, min: Vec3, max: Vec3) -> Vec<Entity> {
        let query = Aabb::new(min, max);
        world
            .entities_with::<(TransformComponent, BoxColliderComponent)>()
            .into_iter()
            .filter(|&entity| world_aabb(world, entity).is_some_and(|aabb| aabb.intersects(&query)))
            .collect()
    }

    /// Other entities whose colliders overlap `entity`'s collider
    pub fn overlapping(&self, world: &World, entity: Entity) -> Vec<Entity> {
        let Some(aabb) = world_aabb(world, entity) else {
            return Vec::new();
        };
        self.box_overlap(world, aabb.min, aabb.max)
            .into_iter()
            .filter(|&other| other != entity)
            .collect()
    }
}

/// World-space collider box of `entity`, if it has both pieces
pub fn world_aabb(world: &World, entity: Entity) -> Option<Aabb> {
    let transform = world.get_component::<TransformComponent>(entity)?;
    let collider = world.get_component::<BoxColliderComponent>(entity)?;
    Some(collider.world_aabb(transform))
}
