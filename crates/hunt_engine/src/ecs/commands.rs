//! Deferred structural mutations
//!
//! Entities spawned while a frame is running are recorded here and only
//! become visible to queries at the world's synchronization point
//! ([`World::maintain`]). The id is reserved at record time so callers can
//! keep a handle to the pending entity.

use super::{Component, EcsError, Entity, World};
use std::any::TypeId;

type Inserter = Box<dyn FnOnce(&mut World, Entity) -> Result<(), EcsError>>;

enum Command {
    /// Activate a reserved entity, then attach its components
    Spawn {
        entity: Entity,
        types: Vec<TypeId>,
        inserters: Vec<Inserter>,
    },
    /// Attach one component to an entity at the sync point
    Insert { entity: Entity, inserter: Inserter },
}

/// Ordered list of deferred commands owned by a [`World`]
#[derive(Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn push_spawn(&mut self, entity: Entity) -> usize {
        self.commands.push(Command::Spawn {
            entity,
            types: Vec::new(),
            inserters: Vec::new(),
        });
        self.commands.len() - 1
    }

    /// Queue `component` on the spawn at `index`. A second `T` on the same
    /// spawn is rejected here, at the call site, not at the sync point.
    pub(crate) fn push_spawn_component<T: Component>(
        &mut self,
        index: usize,
        component: T,
    ) -> Result<(), EcsError> {
        let Some(Command::Spawn {
            entity,
            types,
            inserters,
        }) = self.commands.get_mut(index)
        else {
            return Ok(());
        };
        let type_id = TypeId::of::<T>();
        if types.contains(&type_id) {
            return Err(EcsError::DuplicateComponent {
                entity: *entity,
                component: T::type_name(),
            });
        }
        types.push(type_id);
        inserters.push(Box::new(move |world, entity| {
            world.try_add_component(entity, component)
        }));
        Ok(())
    }

    pub(crate) fn push_insert<T: Component>(&mut self, entity: Entity, component: T) {
        self.commands.push(Command::Insert {
            entity,
            inserter: Box::new(move |world, entity| world.try_add_component(entity, component)),
        });
    }

    /// Apply every command in record order. Returns the entities that were
    /// activated by spawn commands.
    pub(crate) fn apply(self, world: &mut World) -> Vec<Entity> {
        let mut spawned = Vec::new();
        for command in self.commands {
            match command {
                Command::Spawn {
                    entity, inserters, ..
                } => {
                    if !world.activate_reserved(entity) {
                        continue;
                    }
                    for inserter in inserters {
                        if let Err(err) = inserter(world, entity) {
                            log::error!("Deferred spawn of {entity} dropped a component: {err}");
                        }
                    }
                    spawned.push(entity);
                }
                Command::Insert { entity, inserter } => {
                    if let Err(err) = inserter(world, entity) {
                        log::warn!("Deferred insert skipped: {err}");
                    }
                }
            }
        }
        spawned
    }
}

/// Builder returned by [`World::spawn_deferred`]
pub struct EntityCommands<'w> {
    entity: Entity,
    index: usize,
    buffer: &'w mut CommandBuffer,
}

impl<'w> EntityCommands<'w> {
    pub(crate) fn new(entity: Entity, index: usize, buffer: &'w mut CommandBuffer) -> Self {
        Self {
            entity,
            index,
            buffer,
        }
    }

    /// Attach `component` when the entity is activated.
    ///
    /// Queuing a second `T` for the same entity follows the
    /// [`World::add_component`] policy right here: it panics in debug builds
    /// and is logged and dropped in release builds, keeping the first value.
    #[must_use]
    pub fn with<T: Component>(self, component: T) -> Self {
        if let Err(err) = self.buffer.push_spawn_component(self.index, component) {
            log::error!("{err}");
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
        }
        self
    }

    /// The reserved entity id
    pub const fn id(&self) -> Entity {
        self.entity
    }
}
