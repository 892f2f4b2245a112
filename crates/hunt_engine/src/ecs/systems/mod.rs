//! ECS Systems module
//!
//! Run order inside one frame is fixed by the scene manager:
//! movement, shooting, lifecycle, bounds.

pub mod bounds_system;
pub mod collision_system;
pub mod lifecycle_system;
pub mod movement_system;
pub mod rendering_system;
pub mod shooting_system;

pub use bounds_system::BoundsSystem;
pub use collision_system::{CollisionSystem, RaycastHit};
pub use lifecycle_system::LifecycleSystem;
pub use movement_system::MovementSystem;
pub use rendering_system::{RenderItem, RenderingSystem};
pub use shooting_system::ShootingSystem;
