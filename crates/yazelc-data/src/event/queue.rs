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

use yazelc_core::{EngineError, Event};

/// A FIFO of events ready for delivery plus a buffer of events waiting for
/// a number of frame boundaries to pass.
///
/// The delay buffer is keyed by event value: scheduling an event that is
/// already waiting overwrites its remaining delay instead of adding a
/// second copy.
#[derive(Debug)]
pub struct EventQueue<E: Event> {
    immediate: VecDeque<E>,
    /// Waiting events with their remaining frame count, in scheduling order.
    delayed: Vec<(E, u32)>,
}

impl<E: Event> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventQueue<E> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            immediate: VecDeque::new(),
            delayed: Vec::new(),
        }
    }

    /// Schedules `event` for delivery.
    ///
    /// With `delay_frames == 0` the event joins the immediate FIFO. Otherwise
    /// it waits in the delay buffer; if an equal event is already waiting,
    /// its countdown is reset to `delay_frames` (last write wins). Scheduling
    /// a waiting event with a zero delay pulls it out of the buffer.
    pub fn enqueue(&mut self, event: E, delay_frames: u32) {
        let waiting = self.delayed.iter().position(|(e, _)| *e == event);

        match (waiting, delay_frames) {
            (Some(row), 0) => {
                self.delayed.remove(row);
                self.immediate.push_back(event);
            }
            (Some(row), frames) => {
                log::trace!("Rescheduled {event:?} to fire in {frames} frame(s)");
                self.delayed[row].1 = frames;
            }
            (None, 0) => self.immediate.push_back(event),
            (None, frames) => self.delayed.push((event, frames)),
        }
    }

    /// Shorthand for `enqueue(event, 0)`.
    pub fn push(&mut self, event: E) {
        self.enqueue(event, 0);
    }

    /// Counts one frame boundary down for every waiting event.
    ///
    /// Events whose delay reaches zero move to the immediate FIFO in the
    /// order they were scheduled. Returns how many moved.
    pub fn advance_delay_buffer(&mut self) -> usize {
        let mut released = 0;
        let immediate = &mut self.immediate;
        self.delayed.retain_mut(|(event, remaining)| {
            *remaining -= 1;
            if *remaining == 0 {
                immediate.push_back(event.clone());
                released += 1;
                false
            } else {
                true
            }
        });
        released
    }

    /// Pops the oldest ready event.
    ///
    /// Fails with `EmptyQueue` when nothing is ready; check
    /// [`is_empty`](Self::is_empty) first.
    pub fn pop(&mut self) -> Result<E, EngineError> {
        self.immediate.pop_front().ok_or(EngineError::EmptyQueue)
    }

    /// `true` if no event is ready. Waiting events do not count.
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty()
    }

    /// Number of ready events.
    pub fn len(&self) -> usize {
        self.immediate.len()
    }

    /// Number of events still waiting in the delay buffer.
    pub fn pending_delayed(&self) -> usize {
        self.delayed.len()
    }

    /// Remaining frames before `event` fires, if it is waiting.
    pub fn remaining_delay(&self, event: &E) -> Option<u32> {
        self.delayed
            .iter()
            .find(|(e, _)| e == event)
            .map(|(_, remaining)| *remaining)
    }

    /// Drops every ready and waiting event.
    pub fn clear(&mut self) {
        self.immediate.clear();
        self.delayed.clear();
    }
}
