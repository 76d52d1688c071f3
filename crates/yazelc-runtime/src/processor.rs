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

//! The unit of per-frame logic.

use yazelc_core::Event;
use yazelc_data::ecs::World;

/// A system run once per frame by the [`Scheduler`](crate::Scheduler).
///
/// Processors hold no game data. Whatever state they keep is scheduling
/// bookkeeping; components are re-fetched from the world on every call.
/// Processors queue events but never dispatch them.
pub trait Processor<E: Event> {
    /// A short name used in logs and error context.
    fn name(&self) -> &str;

    /// Runs one frame of this processor's logic.
    ///
    /// An error aborts the frame and is propagated to the caller.
    fn process(&mut self, world: &mut World<E>) -> anyhow::Result<()>;
}

/// A processor built from a closure.
///
/// # Examples
///
/// ```rust,ignore
/// scheduler.add(FnProcessor::new("gravity", |world: &mut World<MyEvent>| {
///     for (_, velocity) in world.query_mut::<&mut Velocity>() {
///         velocity.y += 1.0;
///     }
///     Ok(())
/// }));
/// ```
pub struct FnProcessor<F> {
    name: String,
    run: F,
}

impl<F> FnProcessor<F> {
    /// Wraps `run` under `name`.
    pub fn new<E>(name: impl Into<String>, run: F) -> Self
    where
        E: Event,
        F: FnMut(&mut World<E>) -> anyhow::Result<()>,
    {
        Self {
            name: name.into(),
            run,
        }
    }
}

impl<E, F> Processor<E> for FnProcessor<F>
where
    E: Event,
    F: FnMut(&mut World<E>) -> anyhow::Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, world: &mut World<E>) -> anyhow::Result<()> {
        (self.run)(world)
    }
}
