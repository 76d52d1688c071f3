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

//! The frame loop of the yazelc runtime.
//!
//! A [`Scene`] owns one `World`, one `EventManager` and a [`Scheduler`] of
//! [`Processor`]s. Each frame the scheduler advances the delay buffer, runs
//! every processor in registration order, then drains the event queue until
//! it is empty. The [`SceneDirector`] drives scenes one after another,
//! handing explicit carry-over state from each scene to the next.

#![warn(missing_docs)]

pub mod director;
pub mod input;
pub mod logging;
pub mod processor;
pub mod scene;
pub mod scheduler;
pub mod task;

pub use director::{ExitReason, RunSummary, SceneDirector, SceneFactory};
pub use input::{InputFeed, InputSource, RawInput, ScriptedInput};
pub use processor::{FnProcessor, Processor};
pub use scene::{FrameOutcome, Scene};
pub use scheduler::{FrameStats, Scheduler};
pub use task::{schedule_task, Task, TaskInbox, TaskRunner};
