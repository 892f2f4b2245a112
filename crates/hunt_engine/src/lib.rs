//! # Hunt Engine
//!
//! Simulation core of a first-person duck-shooting game, built on a small
//! Entity-Component-System.
//!
//! ## Features
//!
//! - **ECS Registry**: Sparse-set component storage with deferred destruction
//! - **Kinematic Movement**: World- or local-space velocities
//! - **Ray Casting**: Nearest-hit queries against axis-aligned box colliders
//! - **Lifecycle**: Alive, dead and falling targets with a death plane
//! - **Events**: Fire-and-forget gameplay events for external collaborators
//!
//! Rendering, audio and input live outside this crate. The core hands out a
//! render list and consumes fire requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hunt_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let config = SimulationConfig::default();
//! let resources = Arc::new(ResourceCache::new());
//! let mut scene = SceneManager::new(config.clone(), resources.clone());
//!
//! let gun = spawn_gun(scene.world_mut(), &config, resources.as_ref(), Vec3::zeros(), -Vec3::z())?;
//! let params = DuckParams::new(Vec3::new(0.0, 0.0, -10.0), Vec3::x(), 3.0, &config);
//! spawn_duck(scene.world_mut(), &config, resources.as_ref(), &params)?;
//!
//! scene.request_fire(gun);
//! let report = scene.update(1.0 / 60.0);
//! println!("hits: {:?}", report.hits);
//! # Ok::<(), EcsError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod game;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{MaterialHandle, MeshHandle, ResourceCache, ResourceProvider},
        config::{Config, ConfigError, SimulationConfig},
        ecs::{
            components::{
                BoxColliderComponent, EntityTags, EscapeBoundsComponent, HealthComponent,
                HealthState, RaycastSourceComponent, RenderableComponent, TagComponent,
                TransformComponent, TranslationSpace, VelocityComponent,
            },
            systems::{CollisionSystem, RaycastHit, RenderItem},
            Component, EcsError, Entity, FrameReport, SceneError, SceneManager, World,
        },
        events::{EventHandler, EventSystem, EventType, GameEvent},
        foundation::math::{Mat4, Quat, Vec3},
        game::{spawn_duck, spawn_gun, DuckParams, RoundStatus, RoundTracker},
        physics::{Aabb, Ray},
    };
}
