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

use yazelc_core::math::Vec2;
use yazelc_data::ecs::{EntityId, World};
use yazelc_runtime::Processor;

use crate::components::{Position, Velocity, Weapon};
use crate::events::GameEvent;
use crate::state::is_paused;

/// Adds every velocity to its position, then snaps swords to their owner.
#[derive(Debug, Default)]
pub struct MovementProcessor;

impl Processor<GameEvent> for MovementProcessor {
    fn name(&self) -> &str {
        "movement"
    }

    fn process(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        if is_paused(world) {
            return Ok(());
        }

        for (_, (position, velocity)) in world.query_mut::<(&mut Position, &Velocity)>() {
            position.0 += velocity.0;
        }

        let follow: Vec<(EntityId, Vec2)> = world
            .query::<&Weapon>()
            .filter_map(|(sword, weapon)| {
                world
                    .try_component::<Position>(weapon.owner)
                    .map(|owner| (sword, owner.0 + weapon.offset))
            })
            .collect();
        for (sword, at) in follow {
            world.component_for_mut::<Position>(sword)?.0 = at;
        }
        Ok(())
    }
}
