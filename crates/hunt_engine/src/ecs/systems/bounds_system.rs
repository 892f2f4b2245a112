//! Escape detection
//!
//! Any entity with [`EscapeBoundsComponent`] that ends a frame strictly
//! farther than its escape distance from its spawn point is destroyed and
//! reported as escaped. Health state plays no part.

use crate::ecs::components::{EscapeBoundsComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::events::{EventSystem, GameEvent};

/// Destroys entities that left their escape bounds
#[derive(Debug, Default)]
pub struct BoundsSystem;

impl BoundsSystem {
    /// Create a new bounds system
    pub fn new() -> Self {
        Self
    }

    /// Entities currently outside their bounds, without side effects
    pub fn escaped(&self, world: &World) -> Vec<Entity> {
        world
            .entities_with::<(TransformComponent, EscapeBoundsComponent)>()
            .into_iter()
            .filter(|&entity| {
                match (
                    world.get_component::<TransformComponent>(entity),
                    world.get_component::<EscapeBoundsComponent>(entity),
                ) {
                    (Some(transform), Some(bounds)) => bounds.has_escaped(transform.position),
                    _ => false,
                }
            })
            .collect()
    }

    /// Destroy escaped entities and queue one escape event for each
    pub fn update(&mut self, world: &mut World, events: &mut EventSystem) -> Vec<Entity> {
        let mut destroyed = Vec::new();
        for entity in self.escaped(world) {
            // A second trigger in the same frame finds it already pending
            if world.destroy_entity(entity) {
                log::debug!("{entity} escaped");
                events.send(GameEvent::DuckEscaped { entity });
                destroyed.push(entity);
            }
        }
        destroyed
    }
}
