//! Entity-Component-System implementation
//!
//! Entities are bare ids, components are plain values held in one sparse-set
//! storage per type, and systems are functions over [`World`] snapshots.
//! [`SceneManager`] drives the systems in a fixed per-frame order.

pub mod commands;
pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod query;
pub mod scene_manager;
pub mod storage;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use commands::{CommandBuffer, EntityCommands};
pub use component::Component;
pub use entity::Entity;
pub use error::EcsError;
pub use query::Query;
pub use scene_manager::{FrameReport, SceneError, SceneManager};
pub use storage::ComponentStorage;
pub use world::{MaintainReport, World};
