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

//! Scripted multi-frame behaviour as explicit, resumable state.
//!
//! A [`Task`] records how far along it is and moves one step each time it
//! is advanced. The [`TaskRunner`] processor advances the task at the front
//! of its queue once per frame; when it reports completion the next task
//! takes over. Nothing blocks and nothing suspends inside a frame.

mod builtin;
mod runner;

pub use builtin::{EmitEvent, SpawnOnce, WaitFrames};
pub use runner::{schedule_task, TaskInbox, TaskRunner};

use yazelc_core::Event;
use yazelc_data::ecs::World;

/// One step-per-frame unit of scripted behaviour.
pub trait Task<E: Event> {
    /// A short label for logs.
    fn label(&self) -> &str;

    /// Applies one frame of effect.
    fn advance(&mut self, world: &mut World<E>) -> anyhow::Result<()>;

    /// `true` once the task has nothing left to do.
    fn is_complete(&self, world: &World<E>) -> bool;
}
