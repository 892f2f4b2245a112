//! Health state machine and death plane
//!
//! `Alive -> Dead` happens on a hit ([`LifecycleSystem::kill`]). The per-frame
//! update moves `Dead -> Falling` once the death pause has elapsed, and
//! destroys any entity with a transform below the death plane, with or
//! without health and whatever its state.

use crate::assets::ResourceProvider;
use crate::config::LifecycleConfig;
use crate::ecs::components::{
    HealthComponent, HealthState, RenderableComponent, TransformComponent, VelocityComponent,
};
use crate::ecs::{Entity, World};
use crate::events::{EventSystem, GameEvent};
use std::sync::Arc;

/// Drives [`HealthComponent`] state and removes fallen entities
pub struct LifecycleSystem {
    config: LifecycleConfig,
    resources: Arc<dyn ResourceProvider>,
}

impl LifecycleSystem {
    /// Create a lifecycle system that swaps visuals through `resources`
    pub fn new(config: LifecycleConfig, resources: Arc<dyn ResourceProvider>) -> Self {
        Self { config, resources }
    }

    /// Active configuration
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// `Alive -> Dead`: stop the entity, swap in the downed visuals and start
    /// the death timer.
    ///
    /// Returns `false` without side effects if the entity is not alive or has
    /// no [`HealthComponent`].
    pub fn kill(&self, world: &mut World, entity: Entity) -> bool {
        let Some(health) = world.get_component_mut::<HealthComponent>(entity) else {
            return false;
        };
        if !health.is_alive() {
            return false;
        }
        health.set_state(HealthState::Dead);
        let downed_mesh = health.downed_mesh.clone();
        let downed_material = health.downed_material.clone();

        if let Some(velocity) = world.get_component_mut::<VelocityComponent>(entity) {
            velocity.stop();
        }

        if let Some(renderable) = world.get_component_mut::<RenderableComponent>(entity) {
            if let Some(name) = downed_mesh {
                // Unknown mesh: keep the current one
                if let Some(mesh) = self.resources.mesh(&name) {
                    renderable.mesh = Some(mesh);
                }
            }
            if let Some(name) = downed_material {
                renderable.material = Some(self.resources.material_or_fallback(&name));
            }
        }

        log::debug!("{entity} Alive -> Dead");
        true
    }

    /// Advance death timers, start falls and apply the death plane.
    ///
    /// Returns the entities destroyed this call, in scan order.
    pub fn update(
        &mut self,
        world: &mut World,
        delta_time: f32,
        events: &mut EventSystem,
    ) -> Vec<Entity> {
        for entity in world.entities_with::<(HealthComponent,)>() {
            let Some(health) = world.get_component_mut::<HealthComponent>(entity) else {
                continue;
            };
            health.state_time += delta_time;

            if health.state == HealthState::Dead && health.state_time > self.config.death_pause {
                health.set_state(HealthState::Falling);
                self.start_fall(world, entity);
            }
        }

        self.apply_death_plane(world, events)
    }

    fn start_fall(&self, world: &mut World, entity: Entity) {
        let fall = VelocityComponent::new(self.config.fall_direction(), self.config.fall_speed);
        match world.get_component_mut::<VelocityComponent>(entity) {
            Some(velocity) => velocity.set(self.config.fall_direction(), self.config.fall_speed),
            None => {
                let _ = world.set_component(entity, fall);
            }
        }
        log::debug!("{entity} Dead -> Falling");
    }

    /// Destroy every positioned entity strictly below the death plane,
    /// whatever its health state and whether or not it has health at all
    pub fn apply_death_plane(&self, world: &mut World, events: &mut EventSystem) -> Vec<Entity> {
        let below: Vec<Entity> = world
            .entities_with::<(TransformComponent,)>()
            .into_iter()
            .filter(|&entity| {
                world
                    .get_component::<TransformComponent>(entity)
                    .is_some_and(|t| t.position.y < self.config.death_plane_y)
            })
            .collect();

        let mut destroyed = Vec::with_capacity(below.len());
        for entity in below {
            if world.destroy_entity(entity) {
                log::debug!("{entity} fell below y = {}", self.config.death_plane_y);
                events.send(GameEvent::DuckFell { entity });
                destroyed.push(entity);
            }
        }
        destroyed
    }
}
