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

//! The contract between the core and an external renderer.
//!
//! The core never touches pixels. Once per frame the render processor fills
//! a [`RenderQueue`] and hands the depth-sorted items to a [`Renderer`].

use crate::math::{Rect, Vec2};
use crate::resources::{FontId, TextureId};

/// Whether a position is in world space or fixed to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Relative to the camera.
    World,
    /// Absolute screen coordinates (HUD).
    Screen,
}

/// What to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderKind {
    /// A region of a texture.
    Image {
        /// Texture handle.
        texture: TextureId,
        /// Source rectangle inside the texture, `None` for the whole image.
        source: Option<Rect>,
    },
    /// A line of text.
    Text {
        /// Font handle.
        font: FontId,
        /// The text to draw.
        text: String,
    },
    /// An unfilled rectangle, used for debug overlays.
    Outline {
        /// Size of the rectangle.
        size: Vec2,
    },
    /// A black overlay over the whole screen.
    Fade {
        /// 0.0 is fully transparent, 1.0 fully black.
        opacity: f32,
    },
}

/// One drawable item of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// What to draw.
    pub kind: RenderKind,
    /// Draw order; lower depths are drawn first.
    pub depth: i32,
    /// Top-left position.
    pub position: Vec2,
    /// Coordinate space of `position`.
    pub anchor: Anchor,
}

/// The items collected for one frame.
#[derive(Debug, Default)]
pub struct RenderQueue {
    items: Vec<RenderItem>,
}

impl RenderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item.
    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    /// Number of collected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the queue, returning items sorted by ascending depth.
    ///
    /// The sort is stable: items at the same depth keep submission order.
    pub fn into_sorted(mut self) -> Vec<RenderItem> {
        self.items.sort_by_key(|item| item.depth);
        self.items
    }
}

/// An external drawing backend.
pub trait Renderer {
    /// Draws one frame. `items` are sorted by ascending depth.
    fn present(&mut self, items: &[RenderItem]) -> anyhow::Result<()>;
}
