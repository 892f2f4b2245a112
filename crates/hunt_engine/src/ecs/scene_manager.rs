//! # Scene Manager
//!
//! The single integration point of the simulation core. The outer application
//! calls [`SceneManager::update`] once per frame; systems then run in a fixed
//! order:
//!
//! 1. movement
//! 2. shooting (queued fire requests, ray casts see this frame's positions)
//! 3. lifecycle (health state machine, death plane)
//! 4. bounds (escapes)
//! 5. event dispatch to registered collaborators
//! 6. [`World::maintain`]: destroyed entities are purged, deferred spawns appear
//!
//! Anything destroyed during a frame is hidden from later queries in that
//! frame and physically gone before the next one starts.

use crate::assets::ResourceProvider;
use crate::config::{ConfigError, SimulationConfig};
use crate::ecs::systems::{
    BoundsSystem, CollisionSystem, LifecycleSystem, MovementSystem, RenderItem, RenderingSystem,
    ShootingSystem,
};
use crate::ecs::{EcsError, Entity, World};
use crate::events::{EventHandler, EventSystem};
use crate::foundation::time::FrameClock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the scene manager
#[derive(Debug, Error)]
pub enum SceneError {
    /// Registry contract violation
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// What one call to [`SceneManager::update`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// 1-based frame number
    pub frame: u64,
    /// Entities moved by the movement system
    pub moved: usize,
    /// Targets killed by shots
    pub hits: Vec<Entity>,
    /// Targets destroyed for leaving their bounds
    pub escapes: Vec<Entity>,
    /// Targets destroyed below the death plane
    pub fell: Vec<Entity>,
    /// Every entity purged at the end of the frame
    pub destroyed: Vec<Entity>,
    /// Deferred spawns that became visible at the end of the frame
    pub spawned: Vec<Entity>,
}

/// High-level coordinator owning the world and its systems
pub struct SceneManager {
    world: World,
    config: SimulationConfig,
    resources: Arc<dyn ResourceProvider>,
    clock: FrameClock,
    events: EventSystem,
    movement: MovementSystem,
    shooting: ShootingSystem,
    collision: CollisionSystem,
    lifecycle: LifecycleSystem,
    bounds: BoundsSystem,
    rendering: RenderingSystem,
}

impl SceneManager {
    /// Create a scene manager over an empty world
    pub fn new(config: SimulationConfig, resources: Arc<dyn ResourceProvider>) -> Self {
        log::info!("Scene manager created");
        Self {
            world: World::new(),
            collision: CollisionSystem::new(config.raycast.parallel_epsilon),
            lifecycle: LifecycleSystem::new(config.lifecycle.clone(), Arc::clone(&resources)),
            config,
            resources,
            clock: FrameClock::new(),
            events: EventSystem::new(),
            movement: MovementSystem::new(),
            shooting: ShootingSystem::new(),
            bounds: BoundsSystem::new(),
            rendering: RenderingSystem::new(),
        }
    }

    /// Load and validate a config file, then create the scene manager
    pub fn from_config_file(
        path: &str,
        resources: Arc<dyn ResourceProvider>,
    ) -> Result<Self, SceneError> {
        let config = SimulationConfig::load(path)?;
        Ok(Self::new(config, resources))
    }

    /// Register a collaborator for gameplay events
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.events.register_handler(handler);
    }

    /// The entity registry
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The entity registry, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Resource provider shared with the systems
    pub fn resources(&self) -> &Arc<dyn ResourceProvider> {
        &self.resources
    }

    /// Ray and box queries against the current world
    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    /// Event queue, for collaborators posting their own events
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    /// Queue a shot from `gun`; it is resolved during the next update
    pub fn request_fire(&mut self, gun: Entity) {
        self.shooting.request_fire(gun);
    }

    /// Kill `entity` immediately, as if it had been shot
    pub fn kill(&mut self, entity: Entity) -> bool {
        self.lifecycle.kill(&mut self.world, entity)
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Seconds simulated so far
    pub fn total_time(&self) -> f32 {
        self.clock.total_time()
    }

    /// Run one frame. Negative or NaN `delta_time` counts as zero.
    pub fn update(&mut self, delta_time: f32) -> FrameReport {
        let frame = self.clock.advance(delta_time);
        let dt = self.clock.delta_time();

        let moved = self.movement.update(&mut self.world, dt);
        let hits = self.shooting.update(
            &mut self.world,
            &self.collision,
            &self.lifecycle,
            &mut self.events,
        );
        let fell = self.lifecycle.update(&mut self.world, dt, &mut self.events);
        let escapes = self.bounds.update(&mut self.world, &mut self.events);

        self.events.update_time(f64::from(self.clock.total_time()));
        self.events.dispatch();

        let maintained = self.world.maintain();
        if !maintained.destroyed.is_empty() {
            log::trace!("Frame {frame}: purged {} entities", maintained.destroyed.len());
        }

        FrameReport {
            frame,
            moved,
            hits,
            escapes,
            fell,
            destroyed: maintained.destroyed,
            spawned: maintained.spawned,
        }
    }

    /// Render list for the current state of the world
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.rendering.collect(&self.world, self.resources.as_ref())
    }
}
