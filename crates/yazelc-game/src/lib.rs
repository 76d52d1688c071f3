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

//! The adventure game: components, events, processors, event handlers and
//! the scene factory that wires them onto the yazelc runtime.
//!
//! Per frame, processors run in this order: input, tasks, movement,
//! animation, collision, render. Collisions are turned into gameplay by the
//! handlers in [`handlers`] during the drain phase:
//! collision → combat → inventory → transition → HUD.

pub mod components;
pub mod events;
pub mod handlers;
pub mod hud;
pub mod processors;
pub mod scenes;
pub mod state;
pub mod tasks;

pub use events::{GameEvent, GameEventKind};
pub use scenes::{AdventureScenes, EntryPoint, PlayerCarryOver};
