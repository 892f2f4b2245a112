//! # Rendering System
//!
//! Collects what the renderer needs once per frame: a model matrix plus a
//! mesh/material pair per visible entity. No GPU calls happen here.

use crate::assets::{MaterialHandle, MeshHandle, ResourceProvider};
use crate::ecs::components::{RenderableComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Mat4;

/// One draw for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// Source entity
    pub entity: Entity,
    /// World transform, TRS order
    pub model_matrix: Mat4,
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Material to draw with, fallback already substituted
    pub material: MaterialHandle,
}

/// Builds the per-frame render list
#[derive(Debug, Default)]
pub struct RenderingSystem;

impl RenderingSystem {
    /// Create a new rendering system
    pub fn new() -> Self {
        Self
    }

    /// Render items for every live, visible entity that has a mesh.
    ///
    /// Entities without a mesh draw nothing; entities without a material get
    /// the provider's fallback.
    pub fn collect(&self, world: &World, resources: &dyn ResourceProvider) -> Vec<RenderItem> {
        world
            .entities_with::<(TransformComponent, RenderableComponent)>()
            .into_iter()
            .filter_map(|entity| {
                let transform = world.get_component::<TransformComponent>(entity)?;
                let renderable = world.get_component::<RenderableComponent>(entity)?;
                if !renderable.visible {
                    return None;
                }
                let mesh = renderable.mesh.clone()?;
                let material = renderable
                    .material
                    .clone()
                    .unwrap_or_else(|| resources.fallback_material());

                Some(RenderItem {
                    entity,
                    model_matrix: transform.to_matrix(),
                    mesh,
                    material,
                })
            })
            .collect()
    }
}
