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

//! The per-frame input contract handed to the core by an input device.
//!
//! Devices (keyboard, gamepad, a replay script) are external. Whatever they
//! are, they must produce one [`InputState`] per frame, which processors
//! query through the [`InputSnapshot`] trait.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The logical buttons the game reacts to, independent of the physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Swing the sword.
    Attack,
    /// Talk, open, read.
    Interact,
    /// Pause or resume the game.
    Pause,
    /// Toggle debug overlays.
    ToggleDebug,
}

/// Read access to a frame's input.
pub trait InputSnapshot {
    /// `true` while the button is held.
    fn is_down(&self, button: Button) -> bool;
    /// `true` only on the frame the button went down.
    fn is_pressed(&self, button: Button) -> bool;
    /// `true` only on the frame the button went up.
    fn is_released(&self, button: Button) -> bool;
}

/// An edge-detected snapshot of the buttons for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    down: HashSet<Button>,
    pressed: HashSet<Button>,
    released: HashSet<Button>,
}

impl InputState {
    /// Builds the snapshot from the held sets of the previous and current frame.
    pub fn from_transition(previous: &HashSet<Button>, current: &HashSet<Button>) -> Self {
        Self {
            down: current.clone(),
            pressed: current.difference(previous).copied().collect(),
            released: previous.difference(current).copied().collect(),
        }
    }

    /// Builds the snapshot from edges observed as they happened.
    ///
    /// Unlike [`from_transition`](Self::from_transition), a button pressed
    /// and released between two snapshots still reports both edges.
    pub fn from_edges(
        down: HashSet<Button>,
        pressed: HashSet<Button>,
        released: HashSet<Button>,
    ) -> Self {
        Self {
            down,
            pressed,
            released,
        }
    }

    /// The buttons currently held.
    pub fn held(&self) -> &HashSet<Button> {
        &self.down
    }
}

impl InputSnapshot for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.down.contains(&button)
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn is_released(&self, button: Button) -> bool {
        self.released.contains(&button)
    }
}
