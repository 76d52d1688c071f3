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

//! Internal component storage: one type-erased column per component type.

use std::any::TypeId;
use std::collections::HashMap;

use crate::ecs::column::{AnyColumn, ComponentColumn};
use crate::ecs::component::Component;
use crate::ecs::query::QueryAccess;
use yazelc_core::ecs::entity::EntityId;

/// Owns every component value of a world, grouped by component type.
#[derive(Default)]
pub struct ComponentStorage {
    columns: HashMap<TypeId, Box<dyn AnyColumn>>,
}

impl ComponentStorage {
    pub(crate) fn column<T: Component>(&self) -> Option<&ComponentColumn<T>> {
        self.columns
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentColumn<T>>()
    }

    pub(crate) fn column_mut<T: Component>(&mut self) -> Option<&mut ComponentColumn<T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentColumn<T>>()
    }

    /// Inserts or replaces a value, creating the column on first use.
    pub(crate) fn insert<T: Component>(&mut self, entity: EntityId, value: T) -> Option<T> {
        let column = self
            .columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentColumn::<T>::new()));
        match column.as_any_mut().downcast_mut::<ComponentColumn<T>>() {
            Some(column) => column.insert(entity, value),
            None => unreachable!("column keyed by a foreign TypeId"),
        }
    }

    pub(crate) fn remove<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        self.column_mut::<T>()?.remove(entity)
    }

    /// Drops the entity's component of a type known only by its `TypeId`.
    pub(crate) fn remove_erased(&mut self, type_id: TypeId, entity: EntityId) -> bool {
        self.columns
            .get_mut(&type_id)
            .is_some_and(|column| column.remove_entity(entity))
    }

    /// Returns `true` if the entity has a component of the given type.
    pub fn contains(&self, type_id: TypeId, entity: EntityId) -> bool {
        self.columns
            .get(&type_id)
            .is_some_and(|column| column.contains(entity))
    }

    /// Number of instances stored for a component type.
    pub fn count_of(&self, type_id: TypeId) -> usize {
        self.columns.get(&type_id).map_or(0, |column| column.len())
    }

    /// Names of every component type that has ever been stored, sorted.
    pub fn component_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .columns
            .values()
            .map(|column| column.component_name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Collects the entities matching a query's access pattern.
    ///
    /// The smallest required column drives the walk, in its dense row order;
    /// every candidate is then probed against the other required columns and
    /// the excluded ones. Queries without required components start from
    /// `all_alive`.
    pub(crate) fn matching_entities(
        &self,
        access: &QueryAccess,
        all_alive: impl FnOnce() -> Vec<EntityId>,
    ) -> Vec<EntityId> {
        let required = access.required();

        let candidates: Vec<EntityId> = if required.is_empty() {
            all_alive()
        } else {
            let mut driver: Option<&dyn AnyColumn> = None;
            for type_id in required {
                let Some(column) = self.columns.get(type_id) else {
                    // A required type nobody has ever stored: nothing can match.
                    return Vec::new();
                };
                if driver.is_none_or(|d| column.len() < d.len()) {
                    driver = Some(column.as_ref());
                }
            }
            match driver {
                Some(column) => column.entities().to_vec(),
                None => return Vec::new(),
            }
        };

        candidates
            .into_iter()
            .filter(|entity| {
                required
                    .iter()
                    .all(|type_id| self.contains(*type_id, *entity))
                    && !access
                        .excluded()
                        .iter()
                        .any(|type_id| self.contains(*type_id, *entity))
            })
            .collect()
    }
}
