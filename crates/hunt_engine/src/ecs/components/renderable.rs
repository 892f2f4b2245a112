//! Renderable component for entities that can be rendered
//!
//! Holds shared handles only. The renderer owns the GPU side; this component
//! just says which mesh and material an entity should be drawn with.

use crate::assets::{MaterialHandle, MeshHandle};
use crate::ecs::Component;

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableComponent {
    /// Mesh to draw; `None` draws nothing
    pub mesh: Option<MeshHandle>,

    /// Material to draw with; `None` uses the provider's fallback
    pub material: Option<MaterialHandle>,

    /// Whether this object is visible
    pub visible: bool,
}

impl Component for RenderableComponent {}

impl RenderableComponent {
    /// Create a new renderable component
    pub fn new(mesh: Option<MeshHandle>, material: Option<MaterialHandle>) -> Self {
        Self {
            mesh,
            material,
            visible: true,
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible && self.mesh.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshAsset;

    #[test]
    fn test_no_mesh_never_renders() {
        let renderable = RenderableComponent::new(None, None);
        assert!(!renderable.should_render());
    }

    #[test]
    fn test_hidden_does_not_render() {
        let mesh = MeshHandle::new(MeshAsset {
            name: "cube".to_string(),
            vertex_count: 24,
        });
        let mut renderable = RenderableComponent::new(Some(mesh), None);
        assert!(renderable.should_render());
        renderable.set_visible(false);
        assert!(!renderable.should_render());
    }
}
