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

use std::any::Any;
use std::cell::UnsafeCell;

use crate::ecs::component::{short_type_name, Component};
use yazelc_core::ecs::entity::EntityId;

/// An internal helper trait to perform column operations on a type-erased
/// `ComponentColumn<T>` without knowing `T` at compile time.
pub(crate) trait AnyColumn {
    /// Casts the trait object to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts the trait object to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Drops the entity's component, if any. Returns `true` if one was removed.
    fn remove_entity(&mut self, entity: EntityId) -> bool;

    /// Returns `true` if the entity has a row in this column.
    fn contains(&self, entity: EntityId) -> bool;

    /// The entities owning each dense row, in row order.
    fn entities(&self) -> &[EntityId];

    /// Number of rows.
    fn len(&self) -> usize;

    /// Short name of the component type, for diagnostics.
    fn component_name(&self) -> &'static str;
}

/// A sparse set holding every instance of one component type.
///
/// `sparse[entity.index]` is the row of the entity's value in `dense`, and
/// `entities[row]` is the full `EntityId` owning that row, which lets stale
/// ids be told apart from the current occupant of a recycled index.
///
/// Values live in `UnsafeCell`s so a mutable query can hand out `&mut T` to
/// distinct rows from a shared borrow of the column. Outside of such a query
/// every access goes through ordinary `&self`/`&mut self` methods.
pub(crate) struct ComponentColumn<T: Component> {
    dense: Vec<UnsafeCell<T>>,
    entities: Vec<EntityId>,
    sparse: Vec<Option<u32>>,
}

impl<T: Component> ComponentColumn<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            sparse: Vec::new(),
        }
    }

    fn row_of(&self, entity: EntityId) -> Option<usize> {
        let row = (*self.sparse.get(entity.index as usize)?)? as usize;
        (self.entities[row] == entity).then_some(row)
    }

    /// Inserts or replaces the entity's value. Returns the replaced value.
    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        if let Some(row) = self.row_of(entity) {
            return Some(std::mem::replace(self.dense[row].get_mut(), value));
        }

        let index = entity.index as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(self.dense.len() as u32);
        self.dense.push(UnsafeCell::new(value));
        self.entities.push(entity);
        None
    }

    /// Removes the entity's value with a `swap_remove`, patching the row of
    /// the entity that was moved from the end.
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        let row = self.row_of(entity)?;
        self.sparse[entity.index as usize] = None;

        let value = self.dense.swap_remove(row).into_inner();
        self.entities.swap_remove(row);

        if let Some(moved) = self.entities.get(row) {
            self.sparse[moved.index as usize] = Some(row as u32);
        }
        Some(value)
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        let row = self.row_of(entity)?;
        // SAFETY: mutable access to a cell only happens through `&mut self`
        // or through a `QueryMut`, which holds the world exclusively; neither
        // can coexist with this shared borrow.
        Some(unsafe { &*self.dense[row].get() })
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        let row = self.row_of(entity)?;
        Some(self.dense[row].get_mut())
    }

    /// Raw cell access for mutable queries.
    pub fn cell(&self, entity: EntityId) -> Option<&UnsafeCell<T>> {
        let row = self.row_of(entity)?;
        Some(&self.dense[row])
    }
}

impl<T: Component> AnyColumn for ComponentColumn<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.remove(entity).is_some()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.row_of(entity).is_some()
    }

    fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn component_name(&self) -> &'static str {
        short_type_name::<T>()
    }
}
