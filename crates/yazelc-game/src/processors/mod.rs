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

//! The game's processors, registered in the order they are listed here.

mod animation;
mod collision;
mod input;
mod movement;
mod render;

pub use animation::AnimationProcessor;
pub use collision::CollisionProcessor;
pub use input::{InputProcessor, SWORD_ACTIVE_FRAMES, SWORD_REACH};
pub use movement::MovementProcessor;
pub use render::{RenderProcessor, DEBUG_DEPTH, FADE_DEPTH, HUD_DEPTH};
