//! ECS errors
//!
//! Programmer-contract violations surface here instead of as panics so that
//! release builds degrade to a skipped operation.

use super::Entity;
use thiserror::Error;

/// Errors returned by [`World`](super::World) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity was never created, or has been destroyed
    #[error("{0} is not alive")]
    EntityNotFound(Entity),

    /// `add_component` was called for a type the entity already has
    #[error("{entity} already has a {component} component")]
    DuplicateComponent {
        /// Target entity
        entity: Entity,
        /// Component type name
        component: &'static str,
    },

    /// A checked accessor was asked for a component the entity lacks
    #[error("{entity} has no {component} component")]
    MissingComponent {
        /// Target entity
        entity: Entity,
        /// Component type name
        component: &'static str,
    },
}
