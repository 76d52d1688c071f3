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

use std::any::Any;
use std::rc::Rc;

use yazelc_core::input::InputState;
use yazelc_core::Event;
use yazelc_data::ecs::{LeaveRequest, World};
use yazelc_data::event::EventManager;

use crate::processor::Processor;
use crate::scheduler::{FrameStats, Scheduler};

/// What the caller should do after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Run another frame of this scene.
    Continue,
    /// The scene asked to be left.
    Leave(LeaveRequest),
}

/// One gameplay context: a world, its event manager and its processors.
///
/// Objects whose bound methods are subscribed to the manager are held weakly
/// by it; [`keep_alive`](Self::keep_alive) gives them a scene-scoped owner.
pub struct Scene<E: Event> {
    name: String,
    world: World<E>,
    events: EventManager<E>,
    scheduler: Scheduler<E>,
    keep_alive: Vec<Rc<dyn Any>>,
    last_frame: FrameStats,
}

impl<E: Event> Scene<E> {
    /// Wraps a prepared world.
    pub fn new(name: impl Into<String>, world: World<E>) -> Self {
        let name = name.into();
        log::info!("Entering scene '{name}'");
        Self {
            name,
            world,
            events: EventManager::new(),
            scheduler: Scheduler::new(),
            keep_alive: Vec::new(),
            last_frame: FrameStats::default(),
        }
    }

    /// The scene's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene's world.
    pub fn world(&self) -> &World<E> {
        &self.world
    }

    /// The scene's world, mutably.
    pub fn world_mut(&mut self) -> &mut World<E> {
        &mut self.world
    }

    /// The scene's event manager, for subscribing handlers.
    pub fn events_mut(&mut self) -> &mut EventManager<E> {
        &mut self.events
    }

    /// The scene's scheduler.
    pub fn scheduler(&self) -> &Scheduler<E> {
        &self.scheduler
    }

    /// Appends a processor to the scheduler.
    pub fn add_processor<P: Processor<E> + 'static>(&mut self, processor: P) -> &mut Self {
        self.scheduler.add(processor);
        self
    }

    /// Keeps `owner` alive until the scene is torn down.
    pub fn keep_alive<T: 'static>(&mut self, owner: Rc<T>) {
        self.keep_alive.push(owner);
    }

    /// Stats of the most recent frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Runs one frame with `input` and reports whether the scene wants to end.
    pub fn run_frame(&mut self, input: InputState) -> anyhow::Result<FrameOutcome> {
        self.world.set_input(input);
        self.last_frame = self.scheduler.run_frame(&mut self.world, &mut self.events)?;

        Ok(match self.world.take_leave_request() {
            Some(request) => FrameOutcome::Leave(request),
            None => FrameOutcome::Continue,
        })
    }

    /// Ends the scene: every subscription is cleared, scene-scoped owners
    /// are released and the world is handed back for carry-over extraction.
    pub fn teardown(mut self) -> World<E> {
        let undelivered = self.world.events().pending_delayed() + self.world.events().len();
        if undelivered > 0 {
            log::warn!(
                "Leaving scene '{}' with {undelivered} undelivered event(s)",
                self.name
            );
        }
        self.events.clear();
        self.keep_alive.clear();
        log::info!(
            "Left scene '{}' after {} frame(s)",
            self.name,
            self.world.frame()
        );
        self.world
    }
}
