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

use crate::ecs::component::{short_type_name, Component};
use crate::ecs::storage::ComponentStorage;
use yazelc_core::ecs::entity::EntityId;

/// A trait for any collection of components that can be spawned together as a single unit.
///
/// It is implemented on `()` and on tuples of up to twelve components, like
/// `(Position, Velocity)`. A single component is spawned as a one-element
/// tuple: `(Position::default(),)`.
pub trait ComponentBundle: 'static {
    /// Returns the `TypeId` of every component in the bundle, in tuple order.
    ///
    /// Duplicates are kept so the world can reject them before spawning.
    fn type_ids() -> Vec<TypeId>;

    /// Returns the short type name of every component, in tuple order.
    fn type_names() -> Vec<&'static str>;

    /// Moves every component of the bundle into the storage under `entity`.
    fn insert_into(self, storage: &mut ComponentStorage, entity: EntityId);
}

impl ComponentBundle for () {
    fn type_ids() -> Vec<TypeId> {
        Vec::new()
    }

    fn type_names() -> Vec<&'static str> {
        Vec::new()
    }

    fn insert_into(self, _storage: &mut ComponentStorage, _entity: EntityId) {}
}

macro_rules! impl_bundle_tuple {
    ($($C:ident),*) => {
        impl<$($C: Component),*> ComponentBundle for ($($C,)*) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$C>()),*]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(short_type_name::<$C>()),*]
            }

            #[allow(non_snake_case)]
            fn insert_into(self, storage: &mut ComponentStorage, entity: EntityId) {
                let ($($C,)*) = self;
                $(storage.insert(entity, $C);)*
            }
        }
    };
}

impl_bundle_tuple!(C1);
impl_bundle_tuple!(C1, C2);
impl_bundle_tuple!(C1, C2, C3);
impl_bundle_tuple!(C1, C2, C3, C4);
impl_bundle_tuple!(C1, C2, C3, C4, C5);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7, C8);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11);
impl_bundle_tuple!(C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, C12);

/// Returns the name of the first component type that appears twice in `B`.
pub(crate) fn first_duplicate<B: ComponentBundle>() -> Option<&'static str> {
    let ids = B::type_ids();
    let names = B::type_names();
    (1..ids.len())
        .find(|&i| ids[..i].contains(&ids[i]))
        .map(|i| names[i])
}
