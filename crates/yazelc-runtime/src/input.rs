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

//! Sources of per-frame input snapshots.

use std::collections::{HashSet, VecDeque};

use flume::{Receiver, Sender, TryRecvError};
use yazelc_core::input::{Button, InputState};

/// Produces one input snapshot per frame.
pub trait InputSource {
    /// Returns this frame's snapshot, or `None` when the player asked to
    /// quit (window closed, device gone, script exhausted).
    fn poll(&mut self) -> Option<InputState>;
}

/// A raw device message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// A button went down.
    Press(Button),
    /// A button went up.
    Release(Button),
    /// The window or device asked to stop.
    Quit,
}

/// Input fed through a channel by a device thread.
///
/// Every poll drains the messages received since the previous poll and
/// records each edge as it arrives, so a press and release between two
/// polls still shows up as a tap.
pub struct InputFeed {
    receiver: Receiver<RawInput>,
    held: HashSet<Button>,
}

impl InputFeed {
    /// Creates a feed together with the sender the device side writes to.
    pub fn channel() -> (Sender<RawInput>, Self) {
        let (sender, receiver) = flume::unbounded();
        (
            sender,
            Self {
                receiver,
                held: HashSet::new(),
            },
        )
    }
}

impl InputSource for InputFeed {
    fn poll(&mut self) -> Option<InputState> {
        let mut pressed = HashSet::new();
        let mut released = HashSet::new();
        loop {
            match self.receiver.try_recv() {
                Ok(RawInput::Press(button)) => {
                    if self.held.insert(button) {
                        pressed.insert(button);
                    }
                }
                Ok(RawInput::Release(button)) => {
                    if self.held.remove(&button) {
                        released.insert(button);
                    }
                }
                Ok(RawInput::Quit) => {
                    log::info!("Quit received from input device");
                    return None;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::info!("Input device disconnected");
                    return None;
                }
            }
        }
        Some(InputState::from_edges(self.held.clone(), pressed, released))
    }
}

/// Replays a fixed list of held-button sets, one per frame.
///
/// Once the script runs out it either requests a quit or keeps returning
/// empty snapshots, depending on how it was built.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<HashSet<Button>>,
    held: HashSet<Button>,
    quit_at_end: bool,
}

impl ScriptedInput {
    /// A script that quits when exhausted.
    pub fn new<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = Button>,
    {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| frame.into_iter().collect())
                .collect(),
            held: HashSet::new(),
            quit_at_end: true,
        }
    }

    /// A script that idles (no buttons held) when exhausted.
    pub fn endless<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = Button>,
    {
        Self {
            quit_at_end: false,
            ..Self::new(frames)
        }
    }

    /// An idle script that never quits.
    pub fn idle() -> Self {
        Self::endless(Vec::<Vec<Button>>::new())
    }

    /// Frames left in the script.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputState> {
        let current = match self.frames.pop_front() {
            Some(frame) => frame,
            None if self.quit_at_end => return None,
            None => HashSet::new(),
        };
        let state = InputState::from_transition(&self.held, &current);
        self.held = current;
        Some(state)
    }
}
