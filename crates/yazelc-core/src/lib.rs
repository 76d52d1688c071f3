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

//! # Yazelc Core
//!
//! Foundational crate containing the core types and interface contracts shared
//! by the ECS, the runtime and the game: entity identities, the error taxonomy,
//! the event contract, and the boundaries to external collaborators (input
//! devices, resources, renderers and map loaders).

#![warn(missing_docs)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod event;
pub mod input;
pub mod map;
pub mod math;
pub mod render;
pub mod resources;

pub use config::EngineConfig;
pub use ecs::entity::EntityId;
pub use error::EngineError;
pub use event::Event;
