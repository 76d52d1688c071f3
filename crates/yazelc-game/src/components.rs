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

//! Plain-data components of the game.

use serde::{Deserialize, Serialize};
use yazelc_core::math::{Rect, Vec2};
use yazelc_core::resources::TextureId;
use yazelc_data::ecs::{Component, EntityId};

/// Top-left position in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

impl Position {
    /// Creates a position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Displacement applied to [`Position`] every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Creates a velocity.
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Collision box.
///
/// On an entity with a [`Position`] the box is relative to it; otherwise it
/// is in world coordinates (static walls and doors).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitBox(pub Rect);

impl HitBox {
    /// Creates a hit box.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self(Rect::new(x, y, w, h))
    }

    /// The box in world coordinates.
    pub fn world_rect(&self, position: Option<&Position>) -> Rect {
        match position {
            Some(position) => self.0.translated(position.0),
            None => self.0,
        }
    }
}

/// Blocks movers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wall;

/// Leads to another scene.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Door {
    /// Scene to load.
    pub target: String,
    /// Where the player appears in the target scene.
    pub entry: Vec2,
    /// Where the player walks to after appearing, if anywhere.
    pub walk_to: Option<Vec2>,
    /// A locked door consumes a key, or blocks like a wall without one.
    pub locked: bool,
}

/// The controllable hero.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Distance covered per frame while a direction is held.
    pub speed: f32,
    /// Last non-zero movement direction; the sword goes there.
    pub facing: Vec2,
}

impl Player {
    /// A player facing down.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            facing: Vec2::new(0.0, 1.0),
        }
    }
}

/// A patrolling monster hurting the player on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    /// Damage dealt per contact.
    pub damage: i32,
}

/// Hit points.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Remaining hit points.
    pub current: i32,
    /// Upper bound for healing.
    pub max: i32,
}

impl Health {
    /// Full health.
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// Damage immunity after a hit. Removed by a delayed event.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invulnerable;

/// A short-lived sword swing following its owner.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    /// The entity swinging it.
    pub owner: EntityId,
    /// Offset from the owner's position.
    pub offset: Vec2,
    /// Damage dealt per hit.
    pub damage: i32,
}

/// What a pickable turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Currency.
    Coin,
    /// Opens one locked door.
    Key,
    /// Restores health.
    Heart,
}

/// An item lying on the ground.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickable(pub Item);

/// What the player carries.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Collected coins.
    pub coins: u32,
    /// Unused keys.
    pub keys: u32,
}

/// A drawable texture region.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Texture handle, resolved at spawn time.
    pub texture: TextureId,
    /// Region of the texture, `None` for the whole image.
    pub source: Option<Rect>,
    /// Draw order.
    pub depth: i32,
}

/// Playback state of a looping animation strip.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    /// Name of the strip in the resource manager.
    pub strip: String,
    /// Current frame index.
    pub frame: usize,
    /// Frames spent on the current animation frame.
    pub elapsed: u32,
}

impl AnimationState {
    /// Starts `strip` at its first frame.
    pub fn new(strip: impl Into<String>) -> Self {
        Self {
            strip: strip.into(),
            frame: 0,
            elapsed: 0,
        }
    }
}
