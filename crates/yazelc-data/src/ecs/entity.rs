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

/// The record kept for every living entity: which component types it carries.
///
/// The set is kept sorted so membership checks are a binary search and the
/// list is canonical regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadata {
    pub(crate) component_types: Vec<TypeId>,
}

impl EntityMetadata {
    /// Returns `true` if the entity carries a component of this type.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.component_types.binary_search(&type_id).is_ok()
    }

    /// Number of components attached to the entity.
    pub fn component_count(&self) -> usize {
        self.component_types.len()
    }

    pub(crate) fn insert(&mut self, type_id: TypeId) {
        if let Err(pos) = self.component_types.binary_search(&type_id) {
            self.component_types.insert(pos, type_id);
        }
    }

    pub(crate) fn remove(&mut self, type_id: TypeId) -> bool {
        match self.component_types.binary_search(&type_id) {
            Ok(pos) => {
                self.component_types.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}
