//! Gun firing
//!
//! Fire requests are queued by the outer application (input handling lives
//! there) and resolved during the gameplay phase of the next update, after
//! movement, so rays see this frame's positions.

use super::collision_system::CollisionSystem;
use super::lifecycle_system::LifecycleSystem;
use super::movement_system::resolve_direction;
use crate::ecs::components::{HealthComponent, RaycastSourceComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::events::{EventSystem, GameEvent};

/// Resolves queued shots into hits
#[derive(Debug, Default)]
pub struct ShootingSystem {
    requests: Vec<Entity>,
}

impl ShootingSystem {
    /// Create a shooting system with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a shot from `gun` for the next update
    pub fn request_fire(&mut self, gun: Entity) {
        self.requests.push(gun);
    }

    /// Shots waiting for the next update
    pub fn pending_shots(&self) -> usize {
        self.requests.len()
    }

    /// Resolve every queued shot in request order. Returns the entities that
    /// were killed.
    pub fn update(
        &mut self,
        world: &mut World,
        collision: &CollisionSystem,
        lifecycle: &LifecycleSystem,
        events: &mut EventSystem,
    ) -> Vec<Entity> {
        let mut killed = Vec::new();

        for gun in std::mem::take(&mut self.requests) {
            let (Some(transform), Some(source)) = (
                world.get_component::<TransformComponent>(gun),
                world.get_component::<RaycastSourceComponent>(gun),
            ) else {
                log::warn!("Ignoring shot from {gun}: not a live gun");
                continue;
            };
            let origin = transform.position;
            let direction = resolve_direction(transform, source.direction, source.space);

            let hit = collision.raycast_from_entity(world, gun);
            events.send(GameEvent::BulletFired {
                gun,
                origin,
                direction,
                hit: hit.map(|h| h.entity),
            });

            let Some(hit) = hit else {
                continue;
            };
            let Some(points) = world
                .get_component::<HealthComponent>(hit.entity)
                .filter(|health| health.is_alive())
                .map(|health| health.points)
            else {
                continue;
            };

            if lifecycle.kill(world, hit.entity) {
                log::debug!("{gun} hit {} at distance {:.2}", hit.entity, hit.distance);
                events.send(GameEvent::DuckHit {
                    entity: hit.entity,
                    points,
                });
                killed.push(hit.entity);
            }
        }

        killed
    }
}
