//! ECS World - the entity registry
//!
//! Owns entity ids and one [`ComponentStorage`] per component type.
//!
//! Destruction is deferred: [`World::destroy_entity`] hides the entity from
//! every accessor and query immediately, but storages are only purged at
//! [`World::maintain`], the once-per-frame synchronization point. Entities
//! spawned through [`World::spawn_deferred`] become visible at that same point.
//! Queries return owned snapshots (`Vec<Entity>`), never live views, so a
//! sequence captured before a destroy keeps its contents.

use super::commands::{CommandBuffer, EntityCommands};
use super::entity::EntityAllocator;
use super::storage::AnyStorage;
use super::{Component, ComponentStorage, EcsError, Entity, Query};
use std::any::TypeId;
use std::collections::HashMap;

/// Bookkeeping for one entity in the registry
#[derive(Debug, Clone, Copy, Default)]
struct EntityRecord {
    pending_destroy: bool,
}

/// What happened at a synchronization point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintainReport {
    /// Entities purged from every storage
    pub destroyed: Vec<Entity>,
    /// Deferred entities that became visible
    pub spawned: Vec<Entity>,
}

/// ECS World containing all entities and components
pub struct World {
    allocator: EntityAllocator,
    /// Sparse set of every created, not yet purged entity
    entities: ComponentStorage<EntityRecord>,
    /// Destroy requests in the order they were made
    pending_destroy: Vec<Entity>,
    component_storages: HashMap<TypeId, Box<dyn AnyStorage>>,
    commands: CommandBuffer,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: ComponentStorage::new(),
            pending_destroy: Vec::new(),
            component_storages: HashMap::new(),
            commands: CommandBuffer::new(),
        }
    }

    /// Create a new entity, visible immediately
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        let inserted = self.entities.try_insert(entity, EntityRecord::default()).is_ok();
        debug_assert!(inserted, "allocator handed out {entity} twice");
        log::trace!("Created {entity}");
        entity
    }

    /// Reserve an id now and create the entity at the next [`World::maintain`].
    ///
    /// Components chained with [`EntityCommands::with`] are attached at the
    /// same time, so the entity never appears half-built.
    pub fn spawn_deferred(&mut self) -> EntityCommands<'_> {
        let entity = self.allocator.allocate();
        let index = self.commands.push_spawn(entity);
        EntityCommands::new(entity, index, &mut self.commands)
    }

    /// Attach `component` to `entity` at the next [`World::maintain`].
    ///
    /// If the entity already holds a `T` by then, or is gone, the insert is
    /// logged and dropped. It never panics inside `maintain`.
    pub fn insert_deferred<T: Component>(&mut self, entity: Entity, component: T) {
        self.commands.push_insert(entity, component);
    }

    /// Number of deferred commands waiting for the sync point
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Returns `false` if `entity` was already active
    pub(crate) fn activate_reserved(&mut self, entity: Entity) -> bool {
        if self.entities.try_insert(entity, EntityRecord::default()).is_err() {
            log::error!("Deferred {entity} was already active");
            return false;
        }
        log::trace!("Activated deferred {entity}");
        true
    }

    /// Request destruction of `entity`.
    ///
    /// Idempotent: returns `false` if the entity is unknown, already purged,
    /// or already pending. The entity disappears from queries and accessors
    /// at once and from storages at the next [`World::maintain`].
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) if !record.pending_destroy => {
                record.pending_destroy = true;
                self.pending_destroy.push(entity);
                log::trace!("Marked {entity} for destruction");
                true
            }
            _ => false,
        }
    }

    /// Whether `entity` exists and has not been marked for destruction
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| !record.pending_destroy)
    }

    /// Whether `entity` is waiting for the end-of-frame purge
    pub fn is_pending_destruction(&self, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| record.pending_destroy)
    }

    /// Entities waiting for the end-of-frame purge, in request order
    pub fn pending_destruction(&self) -> &[Entity] {
        &self.pending_destroy
    }

    /// Synchronization point: apply deferred spawns, then purge every entity
    /// marked for destruction from the registry and all storages.
    pub fn maintain(&mut self) -> MaintainReport {
        let commands = std::mem::take(&mut self.commands);
        let spawned = commands.apply(self);

        let destroyed = std::mem::take(&mut self.pending_destroy);
        for &entity in &destroyed {
            for storage in self.component_storages.values_mut() {
                storage.remove_entity(entity);
            }
            self.entities.remove(entity);
            log::trace!("Purged {entity}");
        }

        debug_assert!(self.entities.is_consistent());
        MaintainReport { destroyed, spawned }
    }

    /// Attach `component` to `entity`.
    ///
    /// Attaching a type the entity already holds is a contract violation: it
    /// panics in debug builds and returns [`EcsError::DuplicateComponent`] in
    /// release builds, leaving the existing value untouched. Use
    /// [`World::set_component`] to overwrite on purpose.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), EcsError> {
        match self.try_add_component(entity, component) {
            Err(err @ EcsError::DuplicateComponent { .. }) if cfg!(debug_assertions) => {
                panic!("{err}")
            }
            result => result,
        }
    }

    /// [`World::add_component`] without the debug panic, for the deferred
    /// command path where the caller is long gone
    pub(crate) fn try_add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            log::error!("add_component::<{}> on dead {entity}", T::type_name());
            return Err(EcsError::EntityNotFound(entity));
        }

        if self.storage_mut::<T>().try_insert(entity, component).is_ok() {
            return Ok(());
        }

        let err = EcsError::DuplicateComponent {
            entity,
            component: T::type_name(),
        };
        log::error!("{err}");
        Err(err)
    }

    /// Attach or overwrite `component`, returning the previous value
    pub fn set_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        Ok(self.storage_mut::<T>().replace(entity, component))
    }

    /// Detach and return `entity`'s `T`, if any
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_slot_mut::<T>()?.remove(entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.storage_slot_mut::<T>()?.get_mut(entity)
    }

    /// Checked accessor reporting why the component is unavailable
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        self.get_component::<T>(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: T::type_name(),
            })
    }

    /// Checked mutable accessor reporting why the component is unavailable
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::EntityNotFound(entity));
        }
        self.get_component_mut::<T>(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: T::type_name(),
            })
    }

    /// Whether `entity` is alive and holds a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Snapshot of every live entity holding all component types in `Q`.
    ///
    /// Order follows the dense order of the smallest storage in `Q`; it is
    /// stable for one call and free of duplicates.
    pub fn entities_with<Q: Query>(&self) -> Vec<Entity> {
        Q::candidates(self)
            .map(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&entity| self.is_alive(entity) && Q::matches(self, entity))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of `(entity, component)` pairs for every live holder of `T`
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.storage::<T>()
            .map(|storage| {
                storage
                    .iter()
                    .filter(|(entity, _)| self.is_alive(*entity))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every live entity
    pub fn entities(&self) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| !record.pending_destroy)
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len() - self.pending_destroy.len()
    }

    /// Raw storage for `T`.
    ///
    /// Includes entities that are pending destruction until the next
    /// [`World::maintain`]; prefer [`World::query`] for gameplay reads.
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    /// Number of storages holding `entity`, including pending entities.
    /// Zero after the entity has been purged.
    pub fn storages_holding(&self, entity: Entity) -> usize {
        self.component_storages
            .values()
            .filter(|storage| storage.contains_entity(entity))
            .count()
    }

    /// Whether every storage satisfies the dense/sparse invariant and holds
    /// only entities the registry knows about.
    pub fn is_consistent(&self) -> bool {
        self.entities.is_consistent()
            && self.component_storages.values().all(|storage| {
                storage.len() == storage.entity_slice().len()
                    && storage
                        .entity_slice()
                        .iter()
                        .all(|&entity| self.entities.contains(entity))
            })
    }

    fn storage_slot_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<ComponentStorage<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage registered under the wrong TypeId"))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{BTreeSet, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    struct Position(f32);
    impl Component for Position {}

    #[derive(Debug, Clone, PartialEq)]
    struct Speed(f32);
    impl Component for Speed {}

    #[derive(Debug, Clone, PartialEq)]
    struct Marker;
    impl Component for Marker {}

    #[test]
    fn test_create_entity_unique() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        assert_ne!(a, b);
        assert!(world.is_alive(a));
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_purge() {
        let mut world = World::new();
        let a = world.create_entity();
        world.destroy_entity(a);
        world.maintain();
        let b = world.create_entity();
        assert_ne!(a, b);
        assert!(!world.is_alive(a));
    }

    #[test]
    fn test_add_get_has() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(1.0)).unwrap();

        assert!(world.has_component::<Position>(entity));
        assert!(!world.has_component::<Speed>(entity));
        assert_eq!(world.get_component::<Position>(entity), Some(&Position(1.0)));

        world.get_component_mut::<Position>(entity).unwrap().0 = 5.0;
        assert_eq!(world.component::<Position>(entity), Ok(&Position(5.0)));
    }

    #[test]
    fn test_checked_accessor_reports_missing() {
        let mut world = World::new();
        let entity = world.create_entity();
        assert_eq!(
            world.component::<Speed>(entity),
            Err(EcsError::MissingComponent { entity, component: "Speed" })
        );
        assert_eq!(
            world.component::<Speed>(Entity::INVALID).unwrap_err(),
            EcsError::EntityNotFound(Entity::INVALID)
        );
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "already has a Position"))]
    fn test_duplicate_add_is_contract_violation() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(1.0)).unwrap();

        let result = world.add_component(entity, Position(2.0));
        assert_eq!(
            result,
            Err(EcsError::DuplicateComponent { entity, component: "Position" })
        );
        assert_eq!(world.get_component::<Position>(entity), Some(&Position(1.0)));
    }

    #[test]
    fn test_set_component_overwrites() {
        let mut world = World::new();
        let entity = world.create_entity();
        assert_eq!(world.set_component(entity, Speed(1.0)), Ok(None));
        assert_eq!(world.set_component(entity, Speed(2.0)), Ok(Some(Speed(1.0))));
        assert_eq!(world.get_component::<Speed>(entity), Some(&Speed(2.0)));
    }

    #[test]
    fn test_add_to_dead_entity_fails() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.destroy_entity(entity);
        assert_eq!(
            world.add_component(entity, Marker),
            Err(EcsError::EntityNotFound(entity))
        );
    }

    #[test]
    fn test_remove_component() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Speed(3.0)).unwrap();
        assert_eq!(world.remove_component::<Speed>(entity), Some(Speed(3.0)));
        assert!(!world.has_component::<Speed>(entity));
        assert_eq!(world.remove_component::<Speed>(entity), None);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut world = World::new();
        let entity = world.create_entity();
        assert!(world.destroy_entity(entity));
        assert!(!world.destroy_entity(entity));
        assert_eq!(world.pending_destruction(), &[entity]);

        let report = world.maintain();
        assert_eq!(report.destroyed, vec![entity]);
        assert!(!world.destroy_entity(entity));
        assert!(world.maintain().destroyed.is_empty());
    }

    #[test]
    fn test_destroy_hides_immediately_purges_at_maintain() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(0.0)).unwrap();
        world.add_component(entity, Speed(0.0)).unwrap();

        world.destroy_entity(entity);
        assert!(!world.is_alive(entity));
        assert!(world.is_pending_destruction(entity));
        assert!(!world.has_component::<Position>(entity));
        assert!(world.entities_with::<(Position,)>().is_empty());
        // Still physically stored until the sync point
        assert_eq!(world.storages_holding(entity), 2);

        world.maintain();
        assert_eq!(world.storages_holding(entity), 0);
        assert!(!world.is_pending_destruction(entity));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_entities_with_requires_all() {
        let mut world = World::new();
        let both = world.create_entity();
        world.add_component(both, Position(0.0)).unwrap();
        world.add_component(both, Speed(1.0)).unwrap();

        let only_position = world.create_entity();
        world.add_component(only_position, Position(0.0)).unwrap();

        let _bare = world.create_entity();

        assert_eq!(world.entities_with::<(Position, Speed)>(), vec![both]);
        let with_position: HashSet<_> = world.entities_with::<(Position,)>().into_iter().collect();
        assert_eq!(with_position, HashSet::from([both, only_position]));
        assert!(world.entities_with::<(Position, Marker)>().is_empty());
    }

    #[test]
    fn test_query_pairs() {
        let mut world = World::new();
        let a = world.create_entity();
        world.add_component(a, Speed(2.0)).unwrap();
        let pairs = world.query::<Speed>();
        assert_eq!(pairs, vec![(a, &Speed(2.0))]);
    }

    #[test]
    fn test_deferred_spawn_visible_after_maintain() {
        let mut world = World::new();
        let existing = world.create_entity();
        world.add_component(existing, Marker).unwrap();

        let pending = world.spawn_deferred().with(Marker).with(Speed(4.0)).id();
        assert!(!world.is_alive(pending));
        assert_eq!(world.entities_with::<(Marker,)>(), vec![existing]);
        assert_eq!(world.pending_commands(), 1);

        let report = world.maintain();
        assert_eq!(report.spawned, vec![pending]);
        assert!(world.is_alive(pending));
        assert_eq!(world.get_component::<Speed>(pending), Some(&Speed(4.0)));
        assert_eq!(world.entities_with::<(Marker,)>().len(), 2);
    }

    #[test]
    fn test_insert_deferred() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.insert_deferred(entity, Marker);
        assert!(!world.has_component::<Marker>(entity));
        world.maintain();
        assert!(world.has_component::<Marker>(entity));
    }

    #[test]
    fn test_duplicate_in_deferred_spawn_rejected_when_queued() {
        let mut world = World::new();
        let queued = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            world.spawn_deferred().with(Speed(1.0)).with(Speed(2.0)).id()
        }));
        // Debug builds fail at the `with` call, not later
        assert_eq!(queued.is_err(), cfg!(debug_assertions));

        let report = world.maintain();
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(world.get_component::<Speed>(report.spawned[0]), Some(&Speed(1.0)));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_deferred_insert_of_held_type_is_dropped_not_panicking() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Speed(1.0)).unwrap();
        world.insert_deferred(entity, Speed(9.0));

        world.maintain();
        assert_eq!(world.get_component::<Speed>(entity), Some(&Speed(1.0)));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_reactivating_live_entity_keeps_its_record() {
        let mut world = World::new();
        let pending = world.spawn_deferred().with(Marker).id();
        world.maintain();
        assert!(world.destroy_entity(pending));

        assert!(!world.activate_reserved(pending));
        assert!(world.is_pending_destruction(pending));
        world.maintain();
        assert!(!world.is_alive(pending));
    }

    #[test]
    fn test_captured_snapshot_survives_destroy() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Marker).unwrap();

        let snapshot = world.entities_with::<(Marker,)>();
        world.destroy_entity(entity);
        assert_eq!(snapshot, vec![entity]);
        assert!(world.entities_with::<(Marker,)>().is_empty());
    }

    /// Random attach/detach/destroy sequences checked against a brute-force model
    #[test]
    fn test_random_queries_match_reference_model() {
        let mut rng = StdRng::seed_from_u64(0x0ec5_0002);

        for _round in 0..30 {
            let mut world = World::new();
            let mut live: Vec<Entity> = Vec::new();
            let mut has_position: BTreeSet<Entity> = BTreeSet::new();
            let mut has_speed: BTreeSet<Entity> = BTreeSet::new();
            let mut destroyed: Vec<Entity> = Vec::new();

            for step in 0..300 {
                match rng.gen_range(0..7) {
                    0 => live.push(world.create_entity()),
                    1 | 2 if !live.is_empty() => {
                        let entity = live[rng.gen_range(0..live.len())];
                        if !world.has_component::<Position>(entity) {
                            world.add_component(entity, Position(step as f32)).unwrap();
                            has_position.insert(entity);
                        }
                    }
                    3 if !live.is_empty() => {
                        let entity = live[rng.gen_range(0..live.len())];
                        if !world.has_component::<Speed>(entity) {
                            world.add_component(entity, Speed(step as f32)).unwrap();
                            has_speed.insert(entity);
                        }
                    }
                    4 if !live.is_empty() => {
                        let entity = live[rng.gen_range(0..live.len())];
                        world.remove_component::<Position>(entity);
                        has_position.remove(&entity);
                    }
                    5 if !live.is_empty() => {
                        let entity = live.swap_remove(rng.gen_range(0..live.len()));
                        assert!(world.destroy_entity(entity));
                        has_position.remove(&entity);
                        has_speed.remove(&entity);
                        destroyed.push(entity);
                    }
                    6 => {
                        world.maintain();
                        for &entity in &destroyed {
                            assert_eq!(world.storages_holding(entity), 0);
                        }
                    }
                    _ => {}
                }

                let expected: BTreeSet<Entity> =
                    has_position.intersection(&has_speed).copied().collect();
                let actual_vec = world.entities_with::<(Position, Speed)>();
                let actual: BTreeSet<Entity> = actual_vec.iter().copied().collect();
                assert_eq!(actual.len(), actual_vec.len(), "query returned duplicates");
                assert_eq!(actual, expected);
                assert!(world.is_consistent());
            }
        }
    }
}
