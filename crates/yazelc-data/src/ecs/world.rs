// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::any::TypeId;
use std::rc::Rc;

use crate::ecs::bundle::{first_duplicate, ComponentBundle};
use crate::ecs::component::{short_type_name, Component};
use crate::ecs::entity_store::EntityStore;
use crate::ecs::query::{Query, QueryAccess, QueryMut, ReadOnlyWorldQuery, WorldQuery};
use crate::ecs::singletons::Singletons;
use crate::ecs::storage::ComponentStorage;
use crate::event::EventQueue;
use yazelc_core::ecs::entity::EntityId;
use yazelc_core::input::InputState;
use yazelc_core::resources::ResourceManager;
use yazelc_core::{EngineConfig, EngineError, Event};

/// A request, raised from inside a frame, to leave the current scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveRequest {
    /// Stop the game.
    Quit,
    /// Tear the scene down and build the named one.
    Goto(String),
}

/// The central container of a scene: entities, components, per-world
/// singletons, the event queue, the read-only resources and the config.
///
/// A world lives exactly as long as its scene. Nothing in it is shared with
/// the next scene; state that must survive a transition is extracted into an
/// explicit carry-over value before the world is dropped.
pub struct World<E: Event> {
    entities: EntityStore,
    storage: ComponentStorage,
    singletons: Singletons,
    events: EventQueue<E>,
    resources: Rc<ResourceManager>,
    config: EngineConfig,
    input: InputState,
    frame: u64,
    leave: Option<LeaveRequest>,
}

impl<E: Event> Default for World<E> {
    fn default() -> Self {
        Self::new(Rc::new(ResourceManager::default()), EngineConfig::default())
    }
}

impl<E: Event> World<E> {
    /// Creates an empty world over a frozen resource set.
    pub fn new(resources: Rc<ResourceManager>, config: EngineConfig) -> Self {
        Self {
            entities: EntityStore::default(),
            storage: ComponentStorage::default(),
            singletons: Singletons::new(),
            events: EventQueue::new(),
            resources,
            config,
            input: InputState::default(),
            frame: 0,
            leave: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Entity Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Creates an entity carrying every component of `bundle`.
    ///
    /// The bundle is validated before an id is allocated: if it lists a
    /// component type twice, nothing is created and `DuplicateComponent`
    /// is returned.
    pub fn create_entity<B: ComponentBundle>(
        &mut self,
        bundle: B,
    ) -> Result<EntityId, EngineError> {
        if let Some(component) = first_duplicate::<B>() {
            return Err(EngineError::DuplicateComponent { component });
        }

        let id = self.entities.create_entity();
        if let Some(metadata) = self.entities.get_metadata_mut(id) {
            for type_id in B::type_ids() {
                metadata.insert(type_id);
            }
        }
        bundle.insert_into(&mut self.storage, id);
        log::trace!("Created entity {id} with {:?}", B::type_names());
        Ok(id)
    }

    /// Deletes an entity and every component it carries.
    ///
    /// Deleting a dead or never-created entity fails with `UnknownEntity`.
    pub fn delete_entity(&mut self, id: EntityId) -> Result<(), EngineError> {
        let metadata = self
            .entities
            .destroy(id)
            .ok_or(EngineError::UnknownEntity(id))?;
        for type_id in metadata.component_types {
            self.storage.remove_erased(type_id, id);
        }
        log::trace!("Deleted entity {id}");
        Ok(())
    }

    /// Returns `true` if `id` designates a living entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.is_alive(id)
    }

    /// Number of living entities.
    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Iterates every living entity.
    pub fn iter_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter_alive()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Component Access
    // ─────────────────────────────────────────────────────────────────────

    /// Attaches a component, replacing (and returning) any previous one of the same type.
    pub fn add_component<C: Component>(
        &mut self,
        id: EntityId,
        component: C,
    ) -> Result<Option<C>, EngineError> {
        let metadata = self
            .entities
            .get_metadata_mut(id)
            .ok_or(EngineError::UnknownEntity(id))?;
        metadata.insert(TypeId::of::<C>());
        Ok(self.storage.insert(id, component))
    }

    /// Detaches and returns a component.
    pub fn remove_component<C: Component>(&mut self, id: EntityId) -> Result<C, EngineError> {
        let metadata = self
            .entities
            .get_metadata_mut(id)
            .ok_or(EngineError::UnknownEntity(id))?;
        if !metadata.remove(TypeId::of::<C>()) {
            return Err(Self::not_found::<C>(id));
        }
        self.storage
            .remove::<C>(id)
            .ok_or_else(|| Self::not_found::<C>(id))
    }

    /// Returns a component the caller expects to be present.
    pub fn component_for<C: Component>(&self, id: EntityId) -> Result<&C, EngineError> {
        if !self.is_alive(id) {
            return Err(EngineError::UnknownEntity(id));
        }
        self.try_component::<C>(id)
            .ok_or_else(|| Self::not_found::<C>(id))
    }

    /// Mutable variant of [`component_for`](Self::component_for).
    pub fn component_for_mut<C: Component>(&mut self, id: EntityId) -> Result<&mut C, EngineError> {
        if !self.is_alive(id) {
            return Err(EngineError::UnknownEntity(id));
        }
        self.storage
            .column_mut::<C>()
            .and_then(|column| column.get_mut(id))
            .ok_or_else(|| Self::not_found::<C>(id))
    }

    /// Returns a component if present. Dead entities have no components.
    pub fn try_component<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.storage.column::<C>()?.get(id)
    }

    /// Mutable variant of [`try_component`](Self::try_component).
    pub fn try_component_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.storage.column_mut::<C>()?.get_mut(id)
    }

    /// Returns `true` if the entity is alive and carries a `C`.
    pub fn has_component<C: Component>(&self, id: EntityId) -> bool {
        self.storage.contains(TypeId::of::<C>(), id)
    }

    fn not_found<C: Component>(entity: EntityId) -> EngineError {
        EngineError::ComponentNotFound {
            entity,
            component: short_type_name::<C>(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a read-only query over the world.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// for (entity, (pos, vel)) in world.query::<(&Position, &Velocity)>() {
    ///     // every entity carrying both, exactly once
    /// }
    /// ```
    pub fn query<Q: ReadOnlyWorldQuery>(&self) -> Query<'_, Q> {
        let entities = self.entities_with::<Q>();
        Query::new(&self.storage, entities)
    }

    /// Creates a mutable query over the world.
    ///
    /// # Panics
    /// Panics if `Q` borrows the same component type mutably twice.
    pub fn query_mut<Q: WorldQuery>(&mut self) -> QueryMut<'_, Q> {
        let entities = self.entities_with::<Q>();
        QueryMut::new(&mut self.storage, entities)
    }

    /// Returns the ids matching `Q` without borrowing any component, for
    /// systems that create or delete entities while walking the results.
    pub fn entities_with<Q: WorldQuery>(&self) -> Vec<EntityId> {
        let access = QueryAccess::of::<Q>();
        self.storage
            .matching_entities(&access, || self.entities.iter_alive().collect())
    }

    /// Read access to the raw component storage.
    pub fn storage(&self) -> &ComponentStorage {
        &self.storage
    }

    // ─────────────────────────────────────────────────────────────────────
    // Singletons
    // ─────────────────────────────────────────────────────────────────────

    /// Stores a per-world singleton, returning the one it replaced.
    pub fn insert_singleton<T: 'static>(&mut self, value: T) -> Option<T> {
        self.singletons.insert(value)
    }

    /// Returns the singleton of type `T`.
    pub fn singleton<T: 'static>(&self) -> Option<&T> {
        self.singletons.get::<T>()
    }

    /// Returns the singleton of type `T` mutably.
    pub fn singleton_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.singletons.get_mut::<T>()
    }

    /// Removes and returns the singleton of type `T`.
    pub fn remove_singleton<T: 'static>(&mut self) -> Option<T> {
        self.singletons.remove::<T>()
    }

    /// The whole singleton store.
    pub fn singletons_mut(&mut self) -> &mut Singletons {
        &mut self.singletons
    }

    // ─────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────

    /// Queues an event for this frame's drain phase.
    pub fn send(&mut self, event: E) {
        self.events.enqueue(event, 0);
    }

    /// Queues an event that fires after `frames` frame boundaries.
    pub fn send_delayed(&mut self, event: E, frames: u32) {
        self.events.enqueue(event, frames);
    }

    /// The world's event queue.
    pub fn events(&self) -> &EventQueue<E> {
        &self.events
    }

    /// The world's event queue, mutably.
    pub fn events_mut(&mut self) -> &mut EventQueue<E> {
        &mut self.events
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame Context
    // ─────────────────────────────────────────────────────────────────────

    /// The scene's read-only resources.
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// A shared handle to the resources, for building the next scene.
    pub fn resources_handle(&self) -> Rc<ResourceManager> {
        Rc::clone(&self.resources)
    }

    /// The scene's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The scene's configuration, mutably (e.g. the debug toggle).
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// This frame's input snapshot.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Installs the input snapshot for the coming frame.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Number of frames started in this world.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Counts a new frame. Called by the scheduler before anything else.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Asks the scene to end after the current frame. The last request wins.
    pub fn request_leave(&mut self, request: LeaveRequest) {
        log::debug!("Leave requested: {request:?}");
        self.leave = Some(request);
    }

    /// The pending leave request, if any.
    pub fn leave_request(&self) -> Option<&LeaveRequest> {
        self.leave.as_ref()
    }

    /// Takes the pending leave request.
    pub fn take_leave_request(&mut self) -> Option<LeaveRequest> {
        self.leave.take()
    }
}
