//! ECS Components module
//!
//! Plain data only; behavior lives in `ecs::systems`.

pub mod bounds;
pub mod collision;
pub mod lifecycle;
pub mod movement;
pub mod raycast;
pub mod renderable;
pub mod tags;
pub mod transform;

pub use bounds::EscapeBoundsComponent;
pub use collision::BoxColliderComponent;
pub use lifecycle::{HealthComponent, HealthState};
pub use movement::{TranslationSpace, VelocityComponent};
pub use raycast::RaycastSourceComponent;
pub use renderable::RenderableComponent;
pub use tags::{EntityTags, TagComponent};
pub use transform::{facing_rotation, TransformComponent};
