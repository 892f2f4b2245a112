//! Entity factories
//!
//! A duck is not a type, it is an entity with a particular component set.
//! These functions attach that set in one go so no system ever sees a
//! half-built duck. The `_deferred` variants are for spawning from inside a
//! frame: the entity shows up at the next synchronization point.

use crate::assets::ResourceProvider;
use crate::config::SimulationConfig;
use crate::ecs::components::{
    facing_rotation, BoxColliderComponent, EntityTags, EscapeBoundsComponent, HealthComponent,
    RaycastSourceComponent, RenderableComponent, TagComponent, TransformComponent,
    VelocityComponent,
};
use crate::ecs::{EcsError, Entity, World};
use crate::foundation::math::{Quat, Vec3};

/// Asset names the factories look up
pub mod names {
    /// Flying duck mesh and material
    pub const DUCK: &str = "duck";
    /// Shot-down duck mesh and material
    pub const DUCK_DOWNED: &str = "duck_downed";
    /// Gun mesh and material
    pub const GUN: &str = "gun";
    /// Scenery block mesh and material
    pub const BLOCK: &str = "block";
}

/// Where and how a duck flies
#[derive(Debug, Clone, PartialEq)]
pub struct DuckParams {
    /// Spawn point, also the escape-bounds anchor
    pub position: Vec3,
    /// World-space flight direction
    pub direction: Vec3,
    /// Units per second
    pub speed: f32,
    /// Points for shooting it
    pub points: u32,
    /// Decoys carry no points
    pub decoy: bool,
}

impl DuckParams {
    /// Scoring duck worth the configured base score
    pub fn new(position: Vec3, direction: Vec3, speed: f32, config: &SimulationConfig) -> Self {
        Self {
            position,
            direction,
            speed,
            points: config.rules.base_score,
            decoy: false,
        }
    }

    /// Builder pattern: make this a decoy
    #[must_use]
    pub fn as_decoy(mut self) -> Self {
        self.decoy = true;
        self.points = 0;
        self
    }
}

fn duck_tags(params: &DuckParams) -> TagComponent {
    if params.decoy {
        TagComponent(EntityTags::DUCK | EntityTags::DECOY)
    } else {
        TagComponent(EntityTags::DUCK)
    }
}

fn duck_transform(params: &DuckParams) -> TransformComponent {
    TransformComponent::from_position(params.position)
        .with_rotation(facing_rotation(params.direction).unwrap_or_else(Quat::identity))
}

fn duck_health(params: &DuckParams) -> HealthComponent {
    HealthComponent::new(params.points)
        .with_downed_visuals(Some(names::DUCK_DOWNED), Some(names::DUCK_DOWNED))
}

fn visuals(resources: &dyn ResourceProvider, name: &str) -> RenderableComponent {
    RenderableComponent::new(resources.mesh(name), resources.material(name))
}

/// Create a flying duck now
pub fn spawn_duck(
    world: &mut World,
    config: &SimulationConfig,
    resources: &dyn ResourceProvider,
    params: &DuckParams,
) -> Result<Entity, EcsError> {
    let entity = world.create_entity();
    world.add_component(entity, duck_transform(params))?;
    world.add_component(
        entity,
        VelocityComponent::new(params.direction, params.speed).facing_movement(),
    )?;
    world.add_component(entity, BoxColliderComponent::default())?;
    world.add_component(entity, duck_health(params))?;
    world.add_component(
        entity,
        EscapeBoundsComponent::new(params.position, config.bounds.default_escape_distance),
    )?;
    world.add_component(entity, visuals(resources, names::DUCK))?;
    world.add_component(entity, duck_tags(params))?;
    log::debug!("Spawned duck {entity} at {:?}", params.position);
    Ok(entity)
}

/// Reserve a duck that appears at the next [`World::maintain`]
pub fn spawn_duck_deferred(
    world: &mut World,
    config: &SimulationConfig,
    resources: &dyn ResourceProvider,
    params: &DuckParams,
) -> Entity {
    world
        .spawn_deferred()
        .with(duck_transform(params))
        .with(VelocityComponent::new(params.direction, params.speed).facing_movement())
        .with(BoxColliderComponent::default())
        .with(duck_health(params))
        .with(EscapeBoundsComponent::new(
            params.position,
            config.bounds.default_escape_distance,
        ))
        .with(visuals(resources, names::DUCK))
        .with(duck_tags(params))
        .id()
}

/// Create the player's gun at `position`, aimed along `aim`
pub fn spawn_gun(
    world: &mut World,
    config: &SimulationConfig,
    resources: &dyn ResourceProvider,
    position: Vec3,
    aim: Vec3,
) -> Result<Entity, EcsError> {
    let entity = world.create_entity();
    let mut transform = TransformComponent::from_position(position);
    transform.look_along(aim);
    world.add_component(entity, transform)?;
    world.add_component(
        entity,
        RaycastSourceComponent::forward(config.raycast.default_max_distance),
    )?;
    world.add_component(entity, visuals(resources, names::GUN))?;
    world.add_component(entity, TagComponent(EntityTags::GUN))?;
    Ok(entity)
}

/// Turn the gun to aim along `aim`. Returns `false` if `gun` has no transform.
pub fn aim_gun(world: &mut World, gun: Entity, aim: Vec3) -> bool {
    match world.get_component_mut::<TransformComponent>(gun) {
        Some(transform) => {
            transform.look_along(aim);
            true
        }
        None => false,
    }
}

/// Create a static scenery block that stops shots
pub fn spawn_environment_block(
    world: &mut World,
    resources: &dyn ResourceProvider,
    center: Vec3,
    size: Vec3,
) -> Result<Entity, EcsError> {
    let entity = world.create_entity();
    world.add_component(
        entity,
        TransformComponent::from_position(center).with_scale(size),
    )?;
    // Unit cube scaled by the transform
    world.add_component(entity, BoxColliderComponent::from_size(Vec3::new(1.0, 1.0, 1.0)))?;
    world.add_component(entity, visuals(resources, names::BLOCK))?;
    world.add_component(entity, TagComponent(EntityTags::ENVIRONMENT))?;
    Ok(entity)
}
