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

use yazelc_core::Event;
use yazelc_data::ecs::{ComponentBundle, World};

use super::Task;

/// Does nothing for a number of frames.
#[derive(Debug, Clone)]
pub struct WaitFrames {
    remaining: u32,
}

impl WaitFrames {
    /// Waits for `frames` advances.
    pub fn new(frames: u32) -> Self {
        Self { remaining: frames }
    }
}

impl<E: Event> Task<E> for WaitFrames {
    fn label(&self) -> &str {
        "wait"
    }

    fn advance(&mut self, _world: &mut World<E>) -> anyhow::Result<()> {
        self.remaining = self.remaining.saturating_sub(1);
        Ok(())
    }

    fn is_complete(&self, _world: &World<E>) -> bool {
        self.remaining == 0
    }
}

/// Creates one entity on its first advance.
pub struct SpawnOnce<B> {
    label: String,
    bundle: Option<B>,
}

impl<B: ComponentBundle> SpawnOnce<B> {
    /// Spawns `bundle`, labelled for logs.
    pub fn new(label: impl Into<String>, bundle: B) -> Self {
        Self {
            label: label.into(),
            bundle: Some(bundle),
        }
    }
}

impl<E: Event, B: ComponentBundle> Task<E> for SpawnOnce<B> {
    fn label(&self) -> &str {
        &self.label
    }

    fn advance(&mut self, world: &mut World<E>) -> anyhow::Result<()> {
        if let Some(bundle) = self.bundle.take() {
            let entity = world.create_entity(bundle)?;
            log::debug!("Task '{}' spawned {entity}", self.label);
        }
        Ok(())
    }

    fn is_complete(&self, _world: &World<E>) -> bool {
        self.bundle.is_none()
    }
}

/// Queues one event, optionally delayed, on its first advance.
#[derive(Debug, Clone)]
pub struct EmitEvent<E> {
    event: Option<E>,
    delay_frames: u32,
}

impl<E: Event> EmitEvent<E> {
    /// Emits `event` for this frame's drain.
    pub fn now(event: E) -> Self {
        Self::delayed(event, 0)
    }

    /// Emits `event` with a frame delay.
    pub fn delayed(event: E, delay_frames: u32) -> Self {
        Self {
            event: Some(event),
            delay_frames,
        }
    }
}

impl<E: Event> Task<E> for EmitEvent<E> {
    fn label(&self) -> &str {
        "emit"
    }

    fn advance(&mut self, world: &mut World<E>) -> anyhow::Result<()> {
        if let Some(event) = self.event.take() {
            world.send_delayed(event, self.delay_frames);
        }
        Ok(())
    }

    fn is_complete(&self, _world: &World<E>) -> bool {
        self.event.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Processor;
    use crate::task::{schedule_task, TaskRunner};
    use yazelc_data::ecs::Component;

    #[derive(Component, Debug, PartialEq)]
    struct Marker(u8);

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Cue;

    impl Event for Cue {
        type Kind = ();

        fn kind(&self) -> Self::Kind {}
    }

    #[test]
    fn tasks_run_one_after_another() {
        let mut world: World<Cue> = World::default();
        let mut runner = TaskRunner::new()
            .with_task(WaitFrames::new(2))
            .with_task(SpawnOnce::new("marker", (Marker(1),)))
            .with_task(EmitEvent::now(Cue));

        // two waiting frames
        runner.process(&mut world).unwrap();
        runner.process(&mut world).unwrap();
        assert_eq!(world.query::<&Marker>().count(), 0);

        runner.process(&mut world).unwrap();
        assert_eq!(world.query::<&Marker>().count(), 1);
        assert!(world.events().is_empty());

        runner.process(&mut world).unwrap();
        assert_eq!(world.events().len(), 1);

        runner.process(&mut world).unwrap();
        assert!(runner.is_empty());
    }

    #[test]
    fn inbox_tasks_join_the_queue() {
        let mut world: World<Cue> = World::default();
        let mut runner: TaskRunner<Cue> = TaskRunner::new();

        schedule_task(&mut world, SpawnOnce::new("late", (Marker(2),)));
        runner.process(&mut world).unwrap();

        assert_eq!(world.query::<&Marker>().count(), 1);
        assert_eq!(runner.current(), Some("late"));
    }
}
