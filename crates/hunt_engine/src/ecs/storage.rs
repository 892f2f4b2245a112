//! Sparse-set component storage
//!
//! One [`ComponentStorage`] exists per component type. Values live in a dense
//! array next to a parallel array of owning entities; a sparse map points each
//! entity at its dense slot. Removal swaps the last slot into the hole, so add,
//! remove and lookup are all O(1) and iteration walks contiguous memory.
//!
//! Invariant, observable from outside at all times:
//! `entities[sparse[e]] == e` for every key `e`, and
//! `dense.len() == entities.len() == sparse.len()`.

use super::Entity;
use std::any::Any;
use std::collections::HashMap;

/// Dense storage for all instances of one component type
#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    dense: Vec<T>,
    entities: Vec<Entity>,
    sparse: HashMap<Entity, usize>,
}

impl<T> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            sparse: HashMap::new(),
        }
    }

    /// Insert `value` for `entity` unless it already has one.
    ///
    /// On conflict the existing value is kept and `value` is handed back.
    pub fn try_insert(&mut self, entity: Entity, value: T) -> Result<(), T> {
        if self.sparse.contains_key(&entity) {
            return Err(value);
        }
        self.sparse.insert(entity, self.dense.len());
        self.entities.push(entity);
        self.dense.push(value);
        Ok(())
    }

    /// Insert or overwrite, returning the previous value
    pub fn replace(&mut self, entity: Entity, value: T) -> Option<T> {
        match self.sparse.get(&entity) {
            Some(&index) => Some(std::mem::replace(&mut self.dense[index], value)),
            None => {
                let _ = self.try_insert(entity, value);
                None
            }
        }
    }

    /// Remove the value for `entity` by swapping the last slot into its place
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.sparse.remove(&entity)?;
        let last = self.dense.len() - 1;

        let value = self.dense.swap_remove(index);
        self.entities.swap_remove(index);

        if index != last {
            // The former last entity now lives at `index`
            let moved = self.entities[index];
            self.sparse.insert(moved, index);
        }

        Some(value)
    }

    /// Whether `entity` has a value here
    pub fn contains(&self, entity: Entity) -> bool {
        self.sparse.contains_key(&entity)
    }

    /// Get the value for `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.sparse.get(&entity).map(|&index| &self.dense[index])
    }

    /// Get the value for `entity` mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = *self.sparse.get(&entity)?;
        Some(&mut self.dense[index])
    }

    /// Dense slot currently holding `entity`'s value
    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.sparse.get(&entity).copied()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Owning entities in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Values in dense order
    pub fn values(&self) -> &[T] {
        &self.dense
    }

    /// Iterate `(entity, value)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterate `(entity, value)` pairs mutably in dense order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }

    /// Check the dense/sparse invariant. Used by tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        self.dense.len() == self.entities.len()
            && self.entities.len() == self.sparse.len()
            && self
                .entities
                .iter()
                .enumerate()
                .all(|(index, entity)| self.sparse.get(entity) == Some(&index))
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view over a [`ComponentStorage`], used by the world to purge
/// destroyed entities from every storage without knowing their types.
pub(crate) trait AnyStorage: Any + Send + Sync {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn contains_entity(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn entity_slice(&self) -> &[Entity];
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Send + Sync + 'static> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains_entity(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }

    fn entity_slice(&self) -> &[Entity] {
        self.entities()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
