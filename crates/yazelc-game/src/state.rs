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

//! Per-scene singletons stored in the world.

use yazelc_data::ecs::World;

use crate::events::GameEvent;
use crate::scenes::EntryPoint;

/// Whether gameplay is frozen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paused(pub bool);

/// Opacity of the full-screen fade, 0.0 when nothing is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenFade(pub f32);

/// The entry point chosen by the door the player walked through.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry(pub EntryPoint);

/// `true` while the pause toggle is on.
pub fn is_paused(world: &World<GameEvent>) -> bool {
    world.singleton::<Paused>().is_some_and(|paused| paused.0)
}
