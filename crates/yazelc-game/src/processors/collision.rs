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

use yazelc_core::math::Rect;
use yazelc_data::ecs::{EntityId, World};
use yazelc_runtime::Processor;

use crate::components::{HitBox, Position, Velocity};
use crate::events::GameEvent;
use crate::state::is_paused;

/// Queues a [`GameEvent::Collision`] for every mover overlapping another
/// entity's hit box.
///
/// A mover is an entity with a position and a velocity. Its shape is its
/// hit box, or the point at its position if it has none.
#[derive(Debug, Default)]
pub struct CollisionProcessor;

impl Processor<GameEvent> for CollisionProcessor {
    fn name(&self) -> &str {
        "collision"
    }

    fn process(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        if is_paused(world) {
            return Ok(());
        }

        let boxes: Vec<(EntityId, Rect)> = world
            .query::<(&HitBox, Option<&Position>)>()
            .map(|(entity, (hit_box, position))| (entity, hit_box.world_rect(position)))
            .collect();
        let movers: Vec<(EntityId, Rect)> = world
            .query::<(&Position, &Velocity, Option<&HitBox>)>()
            .map(|(entity, (position, _, hit_box))| {
                let shape = match hit_box {
                    Some(hit_box) => hit_box.world_rect(Some(position)),
                    None => Rect::new(position.0.x, position.0.y, 0.0, 0.0),
                };
                (entity, shape)
            })
            .collect();

        for (mover, shape) in &movers {
            for (other, other_box) in &boxes {
                if mover != other && shape.intersects(other_box) {
                    log::trace!("Collision {mover} -> {other}");
                    world.send(GameEvent::Collision {
                        mover: *mover,
                        other: *other,
                    });
                }
            }
        }
        Ok(())
    }
}
