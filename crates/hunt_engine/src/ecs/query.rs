//! Multi-component queries
//!
//! A [`Query`] is a tuple of component types. `World::entities_with::<(A, B)>()`
//! walks the smallest participating storage in dense order and keeps the
//! entities that hold every other listed type, so the cost scales with the
//! rarest component rather than with the entity count.

use super::{Component, Entity, World};

/// A set of component types an entity must hold to match
pub trait Query {
    /// Whether `entity` holds every component in the set
    fn matches(world: &World, entity: Entity) -> bool;

    /// Entities of the smallest storage in the set, or `None` when any listed
    /// type has never been stored (nothing can match).
    fn candidates(world: &World) -> Option<&[Entity]>;
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            fn matches(world: &World, entity: Entity) -> bool {
                $(world.storage::<$name>().is_some_and(|s| s.contains(entity)))&&+
            }

            fn candidates(world: &World) -> Option<&[Entity]> {
                let mut smallest: Option<&[Entity]> = None;
                $(
                    let entities = world.storage::<$name>()?.entities();
                    if smallest.map_or(true, |current| entities.len() < current.len()) {
                        smallest = Some(entities);
                    }
                )+
                smallest
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
