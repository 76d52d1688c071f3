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

use std::collections::VecDeque;

use anyhow::Context;
use yazelc_core::Event;
use yazelc_data::ecs::World;

use super::Task;
use crate::processor::Processor;

/// World singleton through which event handlers and processors hand tasks
/// to the [`TaskRunner`].
pub struct TaskInbox<E: Event> {
    pending: Vec<Box<dyn Task<E>>>,
}

impl<E: Event> Default for TaskInbox<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E: Event> TaskInbox<E> {
    /// Queues a task for the runner.
    pub fn push<T: Task<E> + 'static>(&mut self, task: T) {
        self.pending.push(Box::new(task));
    }

    /// Number of tasks not yet picked up by the runner.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `true` if no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take(&mut self) -> Vec<Box<dyn Task<E>>> {
        std::mem::take(&mut self.pending)
    }
}

/// Queues `task` in the world's [`TaskInbox`], creating the inbox if needed.
pub fn schedule_task<E: Event, T: Task<E> + 'static>(world: &mut World<E>, task: T) {
    log::debug!("Scheduled task '{}'", task.label());
    world
        .singletons_mut()
        .get_or_default::<TaskInbox<E>>()
        .push(task);
}

/// Advances queued tasks in FIFO order, one step per frame.
pub struct TaskRunner<E: Event> {
    queue: VecDeque<Box<dyn Task<E>>>,
}

impl<E: Event> Default for TaskRunner<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> TaskRunner<E> {
    /// Creates an idle runner.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Appends a task to the queue.
    pub fn push<T: Task<E> + 'static>(&mut self, task: T) {
        self.queue.push_back(Box::new(task));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_task<T: Task<E> + 'static>(mut self, task: T) -> Self {
        self.push(task);
        self
    }

    /// Number of queued tasks, the running one included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// `true` when no task is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Label of the task currently at the front.
    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(|task| task.label())
    }
}

impl<E: Event> Processor<E> for TaskRunner<E> {
    fn name(&self) -> &str {
        "task_runner"
    }

    fn process(&mut self, world: &mut World<E>) -> anyhow::Result<()> {
        if let Some(inbox) = world.singleton_mut::<TaskInbox<E>>() {
            self.queue.extend(inbox.take());
        }

        while let Some(task) = self.queue.front() {
            if !task.is_complete(world) {
                break;
            }
            log::debug!("Task '{}' complete", task.label());
            self.queue.pop_front();
        }

        if let Some(task) = self.queue.front_mut() {
            task.advance(world)
                .with_context(|| format!("task '{}' failed", task.label()))?;
        }
        Ok(())
    }
}
