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

//! Internal entity storage and ID management.

use crate::ecs::entity::EntityMetadata;
use yazelc_core::ecs::entity::EntityId;

/// Internal manager for entity slots and metadata.
///
/// The `EntityStore` maintains a dense list of entity handles and their associated
/// metadata. It handles entity creation, recycling of indices via a free list,
/// and metadata access.
///
/// Indices are reused. A slot's generation is bumped when it is handed out
/// again, so an `EntityId` kept from before the deletion no longer matches and
/// every lookup through it reports the entity as dead.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntityStore {
    /// One entry per slot ever created: the current `EntityId` of the slot and
    /// `Some(metadata)` only while that entity is alive.
    entities: Vec<(EntityId, Option<EntityMetadata>)>,
    /// Slot indices available for reuse.
    freed_entities: Vec<u32>,
    alive: usize,
}

impl EntityStore {
    /// Allocates a new or recycled `EntityId`.
    ///
    /// If there are indices in the free list, one is popped and its generation
    /// is incremented. Otherwise, a new slot is appended.
    pub fn create_entity(&mut self) -> EntityId {
        self.alive += 1;
        if let Some(index) = self.freed_entities.pop() {
            let (id_slot, metadata_slot) = &mut self.entities[index as usize];
            id_slot.generation += 1;
            *metadata_slot = Some(EntityMetadata::default());
            *id_slot
        } else {
            let new_id = EntityId {
                index: self.entities.len() as u32,
                generation: 0,
            };
            self.entities
                .push((new_id, Some(EntityMetadata::default())));
            new_id
        }
    }

    /// Marks the entity dead and returns the metadata it had.
    ///
    /// Returns `None` if `id` is stale or was never allocated.
    pub fn destroy(&mut self, id: EntityId) -> Option<EntityMetadata> {
        let (slot_id, metadata) = self.entities.get_mut(id.index as usize)?;
        if *slot_id != id {
            return None;
        }
        let metadata = metadata.take()?;
        self.freed_entities.push(id.index);
        self.alive -= 1;
        Some(metadata)
    }

    /// Returns the metadata of a living entity.
    pub fn get_metadata(&self, id: EntityId) -> Option<&EntityMetadata> {
        self.entities
            .get(id.index as usize)
            .and_then(|(slot_id, meta)| {
                if *slot_id == id {
                    meta.as_ref()
                } else {
                    None
                }
            })
    }

    /// Returns a mutable reference to an entity's metadata if the entity is alive.
    ///
    /// The generation of the provided `EntityId` must match the current generation in the store.
    pub fn get_metadata_mut(&mut self, id: EntityId) -> Option<&mut EntityMetadata> {
        self.entities
            .get_mut(id.index as usize)
            .and_then(|(slot_id, meta)| {
                if *slot_id == id {
                    meta.as_mut()
                } else {
                    None
                }
            })
    }

    /// Returns `true` if `id` designates a living entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get_metadata(id).is_some()
    }

    /// Number of living entities.
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Total number of slots, alive and dead.
    #[allow(dead_code)]
    pub fn slot_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates living entities in slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|(_, meta)| meta.is_some())
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recycled_slot_bumps_generation() {
        let mut store = EntityStore::default();
        let first = store.create_entity();
        assert!(store.destroy(first).is_some());

        let second = store.create_entity();
        assert_eq!(second.index, first.index);
        assert_eq!(second.generation, first.generation + 1);
        assert!(!store.is_alive(first));
        assert!(store.is_alive(second));
        assert_eq!(store.slot_count(), 1);
    }

    #[test]
    fn destroying_twice_fails() {
        let mut store = EntityStore::default();
        let id = store.create_entity();
        assert!(store.destroy(id).is_some());
        assert!(store.destroy(id).is_none());
        assert_eq!(store.alive_count(), 0);
    }
}
