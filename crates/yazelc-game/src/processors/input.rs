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

use yazelc_core::input::{Button, InputSnapshot, InputState};
use yazelc_core::math::Vec2;
use yazelc_data::ecs::{EntityId, World};
use yazelc_runtime::Processor;

use crate::components::{HitBox, Player, Position, Velocity, Weapon};
use crate::events::GameEvent;
use crate::state::is_paused;

/// Frames a sword swing stays out.
pub const SWORD_ACTIVE_FRAMES: u32 = 12;

/// Distance between the player and the sword along the facing direction.
pub const SWORD_REACH: f32 = 12.0;

const SWORD_SIZE: f32 = 8.0;
const SWORD_DAMAGE: i32 = 1;

/// Turns the frame's input snapshot into player velocity, sword swings,
/// pause requests and the debug toggle.
#[derive(Debug, Default)]
pub struct InputProcessor;

impl InputProcessor {
    fn direction(input: &InputState) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if input.is_down(Button::Left) {
            direction.x -= 1.0;
        }
        if input.is_down(Button::Right) {
            direction.x += 1.0;
        }
        if input.is_down(Button::Up) {
            direction.y -= 1.0;
        }
        if input.is_down(Button::Down) {
            direction.y += 1.0;
        }
        direction
    }

    fn swing_sword(
        world: &mut World<GameEvent>,
        owner: EntityId,
        at: Vec2,
        facing: Vec2,
    ) -> anyhow::Result<()> {
        if world.query::<&Weapon>().any(|(_, weapon)| weapon.owner == owner) {
            return Ok(());
        }

        let offset = facing * SWORD_REACH;
        let sword = world.create_entity((
            Position(at + offset),
            HitBox::new(0.0, 0.0, SWORD_SIZE, SWORD_SIZE),
            Weapon {
                owner,
                offset,
                damage: SWORD_DAMAGE,
            },
        ))?;
        world.send_delayed(GameEvent::WeaponExpired(sword), SWORD_ACTIVE_FRAMES);
        log::debug!("{owner} swings sword {sword}");
        Ok(())
    }
}

impl Processor<GameEvent> for InputProcessor {
    fn name(&self) -> &str {
        "input"
    }

    fn process(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        let input = world.input().clone();

        if input.is_pressed(Button::ToggleDebug) {
            let config = world.config_mut();
            config.debug_mode = !config.debug_mode;
            log::info!("Debug overlay {}", if config.debug_mode { "on" } else { "off" });
        }
        if input.is_pressed(Button::Pause) {
            world.send(GameEvent::PauseRequested);
        }
        if is_paused(world) {
            return Ok(());
        }

        let direction = Self::direction(&input);
        let mut swings = Vec::new();
        for (entity, (player, velocity, position)) in
            world.query_mut::<(&mut Player, &mut Velocity, &Position)>()
        {
            velocity.0 = direction * player.speed;
            if direction != Vec2::ZERO {
                player.facing = direction;
            }
            if input.is_pressed(Button::Attack) {
                swings.push((entity, position.0, player.facing));
            }
        }

        for (owner, at, facing) in swings {
            Self::swing_sword(world, owner, at, facing)?;
        }
        Ok(())
    }
}
