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
use std::marker::PhantomData;

use crate::ecs::component::{short_type_name, Component};
use crate::ecs::storage::ComponentStorage;
use yazelc_core::ecs::entity::EntityId;

// ------------------------- //
// ---- WorldQuery Part ---- //
// ------------------------- //

/// The component types a query reads, writes, requires and excludes.
#[derive(Debug, Default, Clone)]
pub struct QueryAccess {
    reads: Vec<(TypeId, &'static str)>,
    writes: Vec<(TypeId, &'static str)>,
    required: Vec<TypeId>,
    excluded: Vec<TypeId>,
}

impl QueryAccess {
    /// Builds and validates the access pattern of `Q`.
    ///
    /// # Panics
    /// Panics if `Q` would hand out two references to the same component
    /// type where one of them is mutable, e.g. `(&mut Position, &Position)`.
    pub fn of<Q: WorldQuery>() -> Self {
        let mut access = Self::default();
        Q::access(&mut access);
        access.validate();
        access.required.sort();
        access.required.dedup();
        access
    }

    /// Records a required, shared access to `T`.
    pub fn read<T: Component>(&mut self) {
        self.reads.push((TypeId::of::<T>(), short_type_name::<T>()));
        self.required.push(TypeId::of::<T>());
    }

    /// Records a required, exclusive access to `T`.
    pub fn write<T: Component>(&mut self) {
        self.writes.push((TypeId::of::<T>(), short_type_name::<T>()));
        self.required.push(TypeId::of::<T>());
    }

    /// Records a shared access to `T` that does not filter entities.
    pub fn read_optional<T: Component>(&mut self) {
        self.reads.push((TypeId::of::<T>(), short_type_name::<T>()));
    }

    /// Records that entities carrying `T` must be skipped.
    pub fn exclude<T: Component>(&mut self) {
        self.excluded.push(TypeId::of::<T>());
    }

    /// Types an entity must carry to match.
    pub fn required(&self) -> &[TypeId] {
        &self.required
    }

    /// Types an entity must not carry to match.
    pub fn excluded(&self) -> &[TypeId] {
        &self.excluded
    }

    fn validate(&self) {
        for (i, (type_id, name)) in self.writes.iter().enumerate() {
            let written_twice = self.writes[..i].iter().any(|(other, _)| other == type_id);
            let also_read = self.reads.iter().any(|(other, _)| other == type_id);
            assert!(
                !written_twice && !also_read,
                "query accesses `{name}` mutably while another reference to it exists"
            );
        }
    }
}

/// A trait implemented by types that can be used to query data from the `World`.
///
/// It is implemented for component references (`&T`, `&mut T`), optional
/// references (`Option<&T>`), the `Without<T>` filter, and tuples of other
/// `WorldQuery` types.
pub trait WorldQuery {
    /// The type of item that the query iterator will yield
    /// (e.g., `(&'a Position, &'a mut Velocity)`).
    type Item<'a>;

    /// Declares which component types the query touches and how.
    fn access(access: &mut QueryAccess);

    /// Fetches the query's item for one entity.
    ///
    /// Returns `None` if the entity lacks a required component.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that:
    /// 1. If the item contains `&mut T`, the storage is not otherwise borrowed
    ///    for `'a`, and no other item handed out for the same entity is alive.
    /// 2. The access pattern of `Self` passed [`QueryAccess::of`] validation.
    unsafe fn fetch<'a>(storage: &'a ComponentStorage, entity: EntityId)
        -> Option<Self::Item<'a>>;
}

/// Marker for queries that never hand out mutable references.
pub trait ReadOnlyWorldQuery: WorldQuery {}

// Implementation for a query of a single, immutable component reference.
impl<T: Component> WorldQuery for &T {
    type Item<'a> = &'a T;

    fn access(access: &mut QueryAccess) {
        access.read::<T>();
    }

    unsafe fn fetch<'a>(
        storage: &'a ComponentStorage,
        entity: EntityId,
    ) -> Option<Self::Item<'a>> {
        storage.column::<T>()?.get(entity)
    }
}

impl<T: Component> ReadOnlyWorldQuery for &T {}

// Implementation for a query of a single, mutable component reference.
impl<T: Component> WorldQuery for &mut T {
    type Item<'a> = &'a mut T;

    fn access(access: &mut QueryAccess) {
        access.write::<T>();
    }

    unsafe fn fetch<'a>(
        storage: &'a ComponentStorage,
        entity: EntityId,
    ) -> Option<Self::Item<'a>> {
        let cell = storage.column::<T>()?.cell(entity)?;
        // SAFETY: the caller guarantees exclusive access to the storage and
        // that this entity's row of `T` is not handed out twice.
        Some(unsafe { &mut *cell.get() })
    }
}

// Implementation for an optional component: never filters, yields `None` when absent.
impl<T: Component> WorldQuery for Option<&T> {
    type Item<'a> = Option<&'a T>;

    fn access(access: &mut QueryAccess) {
        access.read_optional::<T>();
    }

    unsafe fn fetch<'a>(
        storage: &'a ComponentStorage,
        entity: EntityId,
    ) -> Option<Self::Item<'a>> {
        Some(storage.column::<T>().and_then(|column| column.get(entity)))
    }
}

impl<T: Component> ReadOnlyWorldQuery for Option<&T> {}

/// A `WorldQuery` filter that matches entities that do NOT have component `T`.
///
/// `world.query::<(&Position, Without<Velocity>)>()` iterates every entity
/// that has a `Position` but no `Velocity`.
pub struct Without<T: Component>(PhantomData<T>);

impl<T: Component> WorldQuery for Without<T> {
    type Item<'a> = ();

    fn access(access: &mut QueryAccess) {
        access.exclude::<T>();
    }

    unsafe fn fetch<'a>(
        _storage: &'a ComponentStorage,
        _entity: EntityId,
    ) -> Option<Self::Item<'a>> {
        Some(())
    }
}

impl<T: Component> ReadOnlyWorldQuery for Without<T> {}

// Implementation for tuples of WorldQuery types.
macro_rules! impl_query_tuple {
    ($($Q:ident),*) => {
        impl<$($Q: WorldQuery),*> WorldQuery for ($($Q,)*) {
            type Item<'a> = ($($Q::Item<'a>,)*);

            fn access(access: &mut QueryAccess) {
                $($Q::access(access);)*
            }

            unsafe fn fetch<'a>(
                storage: &'a ComponentStorage,
                entity: EntityId,
            ) -> Option<Self::Item<'a>> {
                // SAFETY: forwarded from the caller; validated access ensures
                // the elements touch disjoint columns when one of them writes.
                Some(($(unsafe { $Q::fetch(storage, entity) }?,)*))
            }
        }

        impl<$($Q: ReadOnlyWorldQuery),*> ReadOnlyWorldQuery for ($($Q,)*) {}
    };
}

impl_query_tuple!(Q1);
impl_query_tuple!(Q1, Q2);
impl_query_tuple!(Q1, Q2, Q3);
impl_query_tuple!(Q1, Q2, Q3, Q4);
impl_query_tuple!(Q1, Q2, Q3, Q4, Q5);
impl_query_tuple!(Q1, Q2, Q3, Q4, Q5, Q6);
impl_query_tuple!(Q1, Q2, Q3, Q4, Q5, Q6, Q7);
impl_query_tuple!(Q1, Q2, Q3, Q4, Q5, Q6, Q7, Q8);

// -------------------- //
// ---- Query Part ---- //
// -------------------- //

/// An iterator that yields `(EntityId, item)` for every entity matching `Q`.
///
/// This struct is created by [`World::query()`](crate::ecs::World::query).
/// The matching entities are collected when the query is created, in the
/// dense order of the smallest required column, so the order is stable for
/// as long as no entity or component is added or removed.
pub struct Query<'w, Q: WorldQuery> {
    storage: &'w ComponentStorage,
    entities: std::vec::IntoIter<EntityId>,
    _phantom: PhantomData<Q>,
}

impl<'w, Q: ReadOnlyWorldQuery> Query<'w, Q> {
    pub(crate) fn new(storage: &'w ComponentStorage, entities: Vec<EntityId>) -> Self {
        Self {
            storage,
            entities: entities.into_iter(),
            _phantom: PhantomData,
        }
    }
}

impl<'w, Q: WorldQuery> Iterator for Query<'w, Q> {
    type Item = (EntityId, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        for entity in self.entities.by_ref() {
            // SAFETY: `Q` is read-only, so only shared references are produced.
            if let Some(item) = unsafe { Q::fetch(self.storage, entity) } {
                return Some((entity, item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entities.len()))
    }
}

/// The mutable counterpart of [`Query`], created by
/// [`World::query_mut()`](crate::ecs::World::query_mut).
///
/// It keeps the world exclusively borrowed for its whole lifetime, so no
/// entity or component can be added or removed while it is alive.
pub struct QueryMut<'w, Q: WorldQuery> {
    storage: &'w ComponentStorage,
    entities: std::vec::IntoIter<EntityId>,
    _phantom: PhantomData<Q>,
}

impl<'w, Q: WorldQuery> QueryMut<'w, Q> {
    /// `storage` must come from an exclusive borrow that lasts for `'w`.
    pub(crate) fn new(storage: &'w mut ComponentStorage, entities: Vec<EntityId>) -> Self {
        Self {
            storage,
            entities: entities.into_iter(),
            _phantom: PhantomData,
        }
    }
}

impl<'w, Q: WorldQuery> Iterator for QueryMut<'w, Q> {
    type Item = (EntityId, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        for entity in self.entities.by_ref() {
            // SAFETY: the storage is exclusively borrowed for 'w, the snapshot
            // holds each entity once, and the access pattern was validated.
            if let Some(item) = unsafe { Q::fetch(self.storage, entity) } {
                return Some((entity, item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entities.len()))
    }
}
