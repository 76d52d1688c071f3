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

//! Cutscene tasks.

use yazelc_core::math::Vec2;
use yazelc_data::ecs::{EntityId, World};
use yazelc_runtime::Task;

use crate::components::{Position, Velocity};
use crate::events::GameEvent;
use crate::state::ScreenFade;

/// Walks an entity in a straight line to `to` over a number of frames,
/// overriding its own velocity meanwhile.
#[derive(Debug, Clone)]
pub struct MoveTo {
    entity: EntityId,
    from: Option<Vec2>,
    to: Vec2,
    frames: u32,
    elapsed: u32,
}

impl MoveTo {
    /// Moves `entity` to `to` in `frames` frames.
    pub fn new(entity: EntityId, to: Vec2, frames: u32) -> Self {
        Self {
            entity,
            from: None,
            to,
            frames: frames.max(1),
            elapsed: 0,
        }
    }
}

impl Task<GameEvent> for MoveTo {
    fn label(&self) -> &str {
        "move_to"
    }

    fn advance(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        let start = match self.from {
            Some(start) => start,
            None => {
                let start = world.component_for::<Position>(self.entity)?.0;
                self.from = Some(start);
                start
            }
        };

        self.elapsed += 1;
        let t = self.elapsed as f32 / self.frames as f32;
        world.component_for_mut::<Position>(self.entity)?.0 = start.lerp(self.to, t);
        if let Some(velocity) = world.try_component_mut::<Velocity>(self.entity) {
            velocity.0 = Vec2::ZERO;
        }
        Ok(())
    }

    fn is_complete(&self, world: &World<GameEvent>) -> bool {
        self.elapsed >= self.frames || !world.is_alive(self.entity)
    }
}

/// Moves the [`ScreenFade`] opacity from one level to another.
#[derive(Debug, Clone)]
pub struct Fade {
    from: f32,
    to: f32,
    frames: u32,
    elapsed: u32,
}

impl Fade {
    /// From black to clear.
    pub fn fade_in(frames: u32) -> Self {
        Self::new(1.0, 0.0, frames)
    }

    /// From clear to black.
    pub fn fade_out(frames: u32) -> Self {
        Self::new(0.0, 1.0, frames)
    }

    /// Fades from `from` to `to` opacity.
    pub fn new(from: f32, to: f32, frames: u32) -> Self {
        Self {
            from,
            to,
            frames: frames.max(1),
            elapsed: 0,
        }
    }
}

impl Task<GameEvent> for Fade {
    fn label(&self) -> &str {
        "fade"
    }

    fn advance(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        self.elapsed += 1;
        let t = self.elapsed as f32 / self.frames as f32;
        world.insert_singleton(ScreenFade(self.from + (self.to - self.from) * t));
        Ok(())
    }

    fn is_complete(&self, _world: &World<GameEvent>) -> bool {
        self.elapsed >= self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_lands_exactly_on_target() {
        let mut world = World::default();
        let hero = world
            .create_entity((Position::new(0.0, 0.0), Velocity::new(1.0, 0.0)))
            .unwrap();
        let mut task = MoveTo::new(hero, Vec2::new(8.0, 4.0), 4);

        task.advance(&mut world).unwrap();
        assert_eq!(world.component_for::<Position>(hero).unwrap().0, Vec2::new(2.0, 1.0));
        assert_eq!(world.component_for::<Velocity>(hero).unwrap().0, Vec2::ZERO);

        while !task.is_complete(&world) {
            task.advance(&mut world).unwrap();
        }
        assert_eq!(world.component_for::<Position>(hero).unwrap().0, Vec2::new(8.0, 4.0));
    }

    #[test]
    fn fade_in_ends_clear() {
        let mut world = World::default();
        let mut fade = Fade::fade_in(2);

        fade.advance(&mut world).unwrap();
        assert_eq!(world.singleton::<ScreenFade>(), Some(&ScreenFade(0.5)));
        fade.advance(&mut world).unwrap();
        assert!(fade.is_complete(&world));
        assert_eq!(world.singleton::<ScreenFade>(), Some(&ScreenFade(0.0)));
    }
}
