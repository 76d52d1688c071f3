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

//! Ordered processor execution followed by a bounded event drain.

use std::collections::HashMap;

use anyhow::Context;
use yazelc_core::{EngineError, Event};
use yazelc_data::ecs::World;
use yazelc_data::event::EventManager;

use crate::processor::Processor;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// The world's frame counter after this frame started.
    pub frame: u64,
    /// Delayed events that became ready at the start of the frame.
    pub released: usize,
    /// Events popped and dispatched during the drain phase.
    pub dispatched: usize,
}

/// Runs processors in registration order, then drains the event queue.
///
/// A frame is:
/// 1. advance the delay buffer once, so an event queued with a delay of one
///    frame fires during the next frame and never the current one;
/// 2. run every processor once;
/// 3. pop and dispatch events until the queue is empty, including events
///    queued by handlers during the drain. The drain is capped by
///    `EngineConfig::max_drain_iterations`.
pub struct Scheduler<E: Event> {
    processors: Vec<Box<dyn Processor<E>>>,
}

impl<E: Event> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Scheduler<E> {
    /// Creates a scheduler with no processors.
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Appends a processor. Processors run in the order they were added.
    pub fn add<P: Processor<E> + 'static>(&mut self, processor: P) -> &mut Self {
        log::debug!("Registered processor '{}'", processor.name());
        self.processors.push(Box::new(processor));
        self
    }

    /// Names of the registered processors, in execution order.
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// `true` if no processor is registered.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Runs one full frame against `world`, delivering events through `manager`.
    ///
    /// A failing processor aborts the frame before any later processor
    /// runs and before the drain.
    pub fn run_frame(
        &mut self,
        world: &mut World<E>,
        manager: &mut EventManager<E>,
    ) -> anyhow::Result<FrameStats> {
        world.begin_frame();
        let released = world.events_mut().advance_delay_buffer();

        for processor in &mut self.processors {
            if let Err(error) = processor.process(world) {
                log::error!(
                    "Processor '{}' failed on frame {}: {error:#}",
                    processor.name(),
                    world.frame()
                );
                return Err(error).with_context(|| {
                    format!("processor '{}' failed", processor.name())
                });
            }
        }

        let dispatched = Self::drain(world, manager)?;
        let stats = FrameStats {
            frame: world.frame(),
            released,
            dispatched,
        };
        log::trace!("Frame {} done: {stats:?}", stats.frame);
        Ok(stats)
    }

    /// Pops and dispatches ready events until none is left.
    ///
    /// Fails with `EventQueueDivergence`, naming the most frequently
    /// dispatched event kind, once the configured iteration cap is reached
    /// while events are still queued.
    pub fn drain(world: &mut World<E>, manager: &mut EventManager<E>) -> anyhow::Result<usize> {
        let limit = world.config().max_drain_iterations;
        let mut per_kind: HashMap<E::Kind, usize> = HashMap::new();
        let mut iterations = 0;

        while !world.events().is_empty() {
            if iterations >= limit {
                let event = per_kind
                    .into_iter()
                    .max_by_key(|(_, count)| *count)
                    .map(|(kind, _)| format!("{kind:?}"))
                    .unwrap_or_default();
                log::error!(
                    "Event drain diverged after {iterations} dispatches, dominated by {event}"
                );
                return Err(EngineError::EventQueueDivergence { event, iterations }.into());
            }

            let event = world.events_mut().pop()?;
            *per_kind.entry(event.kind()).or_default() += 1;
            manager.dispatch(&event, world)?;
            iterations += 1;
        }

        Ok(iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::FnProcessor;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Beat {
        Start(u32),
        Echo,
    }

    impl Event for Beat {
        type Kind = &'static str;

        fn kind(&self) -> Self::Kind {
            match self {
                Beat::Start(_) => "start",
                Beat::Echo => "echo",
            }
        }
    }

    #[test]
    fn processors_run_in_registration_order() {
        let mut world: World<Beat> = World::default();
        let mut manager = EventManager::new();
        let mut scheduler = Scheduler::new();
        world.insert_singleton(Vec::<&'static str>::new());

        for name in ["input", "movement", "render"] {
            scheduler.add(FnProcessor::new(name, move |world: &mut World<Beat>| {
                world.singletons_mut().get_or_default::<Vec<&'static str>>().push(name);
                Ok(())
            }));
        }
        scheduler.run_frame(&mut world, &mut manager).unwrap();

        assert_eq!(scheduler.processor_names(), vec!["input", "movement", "render"]);
        assert_eq!(
            world.singleton::<Vec<&'static str>>().unwrap(),
            &vec!["input", "movement", "render"]
        );
    }

    #[test]
    fn failing_processor_aborts_the_frame() {
        let mut world: World<Beat> = World::default();
        let mut manager = EventManager::new();
        let mut scheduler = Scheduler::new();
        scheduler.add(FnProcessor::new("broken", |world: &mut World<Beat>| {
            world.send(Beat::Echo);
            anyhow::bail!("out of cheese")
        }));
        scheduler.add(FnProcessor::new("after", |world: &mut World<Beat>| {
            world.insert_singleton(true);
            Ok(())
        }));

        let error = scheduler.run_frame(&mut world, &mut manager).unwrap_err();

        assert!(format!("{error:#}").contains("processor 'broken' failed"));
        assert!(world.singleton::<bool>().is_none());
        assert_eq!(world.events().len(), 1);
    }

    #[test]
    fn delayed_event_fires_on_the_following_frame() {
        let mut world: World<Beat> = World::default();
        let mut manager = EventManager::new();
        let mut scheduler: Scheduler<Beat> = Scheduler::new();
        manager.subscribe_closure("echo", |_, world| {
            *world.singletons_mut().get_or_default::<u32>() += 1;
            Ok(())
        });

        world.send_delayed(Beat::Echo, 1);
        let first = scheduler.run_frame(&mut world, &mut manager).unwrap();
        assert_eq!(first.released, 1);
        assert_eq!(world.singleton::<u32>(), Some(&1));

        world.send_delayed(Beat::Echo, 2);
        scheduler.run_frame(&mut world, &mut manager).unwrap();
        assert_eq!(world.singleton::<u32>(), Some(&1));
        scheduler.run_frame(&mut world, &mut manager).unwrap();
        assert_eq!(world.singleton::<u32>(), Some(&2));
    }

    #[test]
    fn chained_events_drain_in_one_frame() {
        let mut world: World<Beat> = World::default();
        let mut manager = EventManager::new();
        let mut scheduler: Scheduler<Beat> = Scheduler::new();
        manager.subscribe_closure("start", |event, world| {
            if let Beat::Start(n) = event {
                if *n > 0 {
                    world.send(Beat::Start(n - 1));
                }
                world.send(Beat::Echo);
            }
            Ok(())
        });
        manager.subscribe_closure("echo", |_, _| Ok(()));

        world.send(Beat::Start(3));
        let stats = scheduler.run_frame(&mut world, &mut manager).unwrap();

        assert_eq!(stats.dispatched, 8);
        assert!(world.events().is_empty());
    }

    #[test]
    fn self_feeding_handler_diverges() {
        let mut world: World<Beat> = World::default();
        world.config_mut().max_drain_iterations = 50;
        let mut manager = EventManager::new();
        let mut scheduler: Scheduler<Beat> = Scheduler::new();
        manager.subscribe_closure("echo", |_, world| {
            world.send(Beat::Echo);
            Ok(())
        });

        world.send(Beat::Echo);
        let error = scheduler.run_frame(&mut world, &mut manager).unwrap_err();

        assert_eq!(
            error.downcast_ref::<EngineError>(),
            Some(&EngineError::EventQueueDivergence {
                event: "\"echo\"".to_string(),
                iterations: 50,
            })
        );
    }
}
