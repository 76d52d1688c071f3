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

//! Drives scenes one after another.

use anyhow::Context;
use yazelc_core::Event;
use yazelc_data::ecs::{LeaveRequest, World};

use crate::input::InputSource;
use crate::scene::{FrameOutcome, Scene};

/// Builds scenes by name and extracts what survives a transition.
///
/// Carry-over is an owned value: the next scene re-creates whatever entities
/// it describes in its own world, so no entity id crosses worlds.
pub trait SceneFactory {
    /// The event type of the scenes this factory builds.
    type Event: Event;

    /// State handed from a scene to its successor.
    type CarryOver;

    /// Builds the scene named `target`.
    ///
    /// Fails on unknown names and on missing resources.
    fn build(
        &mut self,
        target: &str,
        carry_over: Option<Self::CarryOver>,
    ) -> anyhow::Result<Scene<Self::Event>>;

    /// Extracts the carry-over from a world that is about to be dropped.
    fn carry_over(&self, world: &World<Self::Event>) -> Option<Self::CarryOver>;

    /// Receives the carry-over of the last scene when the run ends.
    fn finish(&mut self, _final_state: Option<Self::CarryOver>) {}
}

/// Why [`SceneDirector::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A scene requested [`LeaveRequest::Quit`].
    Quit,
    /// The input source reported a quit.
    InputClosed,
    /// The configured frame limit was reached.
    FrameLimit,
}

/// The result of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames run across all scenes.
    pub frames: u64,
    /// Scene names in the order they were entered.
    pub scenes: Vec<String>,
    /// Why the run ended.
    pub exit: ExitReason,
}

/// Owns the factory and the input source and runs the frame loop.
pub struct SceneDirector<F: SceneFactory, I: InputSource> {
    factory: F,
    input: I,
    max_frames: Option<u64>,
}

impl<F: SceneFactory, I: InputSource> SceneDirector<F, I> {
    /// Creates a director that runs until quit.
    pub fn new(factory: F, input: I) -> Self {
        Self {
            factory,
            input,
            max_frames: None,
        }
    }

    /// Stops the run after `max_frames` frames.
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// The scene factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Consumes the director, returning the factory.
    pub fn into_factory(self) -> F {
        self.factory
    }

    /// Runs scenes starting from `start` until quit, input closure or the
    /// frame limit.
    ///
    /// A frame error tears the scene down and is returned with the scene
    /// name as context.
    pub fn run(&mut self, start: &str) -> anyhow::Result<RunSummary> {
        self.run_from(start, None)
    }

    /// Like [`run`](Self::run), entering the first scene with `carry_over`
    /// (e.g. a loaded save).
    pub fn run_from(
        &mut self,
        start: &str,
        carry_over: Option<F::CarryOver>,
    ) -> anyhow::Result<RunSummary> {
        let mut scene = self
            .factory
            .build(start, carry_over)
            .with_context(|| format!("failed to build scene '{start}'"))?;
        let mut summary = RunSummary {
            frames: 0,
            scenes: vec![scene.name().to_string()],
            exit: ExitReason::FrameLimit,
        };

        loop {
            if self.max_frames.is_some_and(|max| summary.frames >= max) {
                log::info!("Frame limit of {} reached", summary.frames);
                summary.exit = ExitReason::FrameLimit;
                break;
            }

            let Some(input) = self.input.poll() else {
                summary.exit = ExitReason::InputClosed;
                break;
            };

            let outcome = match scene.run_frame(input) {
                Ok(outcome) => outcome,
                Err(error) => {
                    let name = scene.name().to_string();
                    scene.teardown();
                    return Err(error).with_context(|| format!("scene '{name}' aborted"));
                }
            };
            summary.frames += 1;

            match outcome {
                FrameOutcome::Continue => {}
                FrameOutcome::Leave(LeaveRequest::Quit) => {
                    summary.exit = ExitReason::Quit;
                    break;
                }
                FrameOutcome::Leave(LeaveRequest::Goto(target)) => {
                    log::info!("Transition '{}' -> '{target}'", scene.name());
                    let world = scene.teardown();
                    let carry_over = self.factory.carry_over(&world);
                    drop(world);

                    scene = self
                        .factory
                        .build(&target, carry_over)
                        .with_context(|| format!("failed to build scene '{target}'"))?;
                    summary.scenes.push(scene.name().to_string());
                }
            }
        }

        let world = scene.teardown();
        let final_state = self.factory.carry_over(&world);
        drop(world);
        self.factory.finish(final_state);
        log::info!("Run finished: {summary:?}");
        Ok(summary)
    }
}
