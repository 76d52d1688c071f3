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

//! Implements the runtime's entity-component store.
//!
//! Every component type gets its own column: a sparse set mapping an entity's
//! index to a row of a dense `Vec`. Adding, removing and probing a component
//! are O(1), and iterating all entities with `{A, B}` walks the smaller of the
//! two dense columns and probes the other.
//!
//! The primary entry point for interacting with the ECS is the [`World`] struct.

mod bundle;
mod column;
mod component;
mod entity;
mod entity_store;
mod query;
mod singletons;
mod storage;
mod world;

pub use bundle::ComponentBundle;
pub use component::Component;
pub use entity::EntityMetadata;
pub use query::*;
pub use singletons::Singletons;
pub use storage::ComponentStorage;
pub use world::*;
pub use yazelc_core::ecs::entity::EntityId;
pub use yazelc_macros::Component;
