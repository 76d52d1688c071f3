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

use anyhow::Context;
use yazelc_core::map::SpawnSpec;
use yazelc_core::math::Vec2;
use yazelc_data::ecs::{EntityId, World};

use super::PlayerCarryOver;
use crate::components::{
    AnimationState, Door, Enemy, Health, HitBox, Inventory, Item, Pickable, Player, Position,
    Sprite, Velocity, Wall,
};
use crate::events::GameEvent;

const DEFAULT_PLAYER_SPEED: f32 = 1.5;
const DEFAULT_PLAYER_HEALTH: i64 = 6;
const DEFAULT_ENEMY_HEALTH: i64 = 2;
const DEFAULT_ENEMY_DAMAGE: i64 = 1;

fn sprite(world: &World<GameEvent>, texture: &str, depth: i32) -> anyhow::Result<Sprite> {
    Ok(Sprite {
        texture: world.resources().get_texture(texture)?.id,
        source: None,
        depth,
    })
}

fn animation(world: &World<GameEvent>, strip: &str) -> anyhow::Result<AnimationState> {
    world.resources().get_animation_strip(strip)?;
    Ok(AnimationState::new(strip))
}

fn required_vec(spec: &SpawnSpec, x: &str, y: &str) -> anyhow::Result<Vec2> {
    Ok(Vec2::new(
        spec.float_property(x)
            .with_context(|| format!("{} at {:?} has no '{x}'", spec.kind, spec.position))?,
        spec.float_property(y)
            .with_context(|| format!("{} at {:?} has no '{y}'", spec.kind, spec.position))?,
    ))
}

fn local_box(spec: &SpawnSpec) -> HitBox {
    HitBox::new(0.0, 0.0, spec.size.x, spec.size.y)
}

fn world_box(spec: &SpawnSpec) -> HitBox {
    HitBox::new(spec.position.x, spec.position.y, spec.size.x, spec.size.y)
}

/// Creates the entity described by `spec`.
///
/// The player takes its health, inventory and position from `carry_over`
/// when one is given. Unknown kinds, missing door properties and missing
/// textures are errors.
pub fn spawn_object(
    world: &mut World<GameEvent>,
    spec: &SpawnSpec,
    carry_over: Option<&PlayerCarryOver>,
) -> anyhow::Result<EntityId> {
    let entity = match spec.kind.as_str() {
        "player" => {
            let speed = spec.float_property("speed").unwrap_or(DEFAULT_PLAYER_SPEED);
            let max = spec.int_property("health").unwrap_or(DEFAULT_PLAYER_HEALTH) as i32;
            let (health, inventory, position) = match carry_over {
                Some(carry) => (
                    carry.health,
                    carry.inventory,
                    carry.entry.map_or(spec.position, |entry| entry.position),
                ),
                None => (Health::full(max), Inventory::default(), spec.position),
            };
            let sprite = sprite(world, "player", 2)?;
            let animation = animation(world, "player_walk")?;
            world.create_entity((
                Position(position),
                Velocity::default(),
                local_box(spec),
                Player::new(speed),
                health,
                inventory,
                sprite,
                animation,
            ))?
        }
        "wall" => world.create_entity((Wall, world_box(spec)))?,
        "door" => {
            let target = spec
                .str_property("target")
                .with_context(|| format!("door at {:?} has no target", spec.position))?;
            let walk_to = required_vec(spec, "walk_x", "walk_y").ok();
            let door = Door {
                target: target.to_string(),
                entry: required_vec(spec, "entry_x", "entry_y")?,
                walk_to,
                locked: spec.bool_property("locked").unwrap_or(false),
            };
            world.create_entity((door, world_box(spec)))?
        }
        "enemy" => {
            let velocity = Velocity::new(
                spec.float_property("vx").unwrap_or(0.0),
                spec.float_property("vy").unwrap_or(0.0),
            );
            let enemy = Enemy {
                damage: spec.int_property("damage").unwrap_or(DEFAULT_ENEMY_DAMAGE) as i32,
            };
            let max = spec.int_property("health").unwrap_or(DEFAULT_ENEMY_HEALTH) as i32;
            let health = Health::full(max);
            let sprite = sprite(world, "slime", 2)?;
            let animation = animation(world, "slime_idle")?;
            world.create_entity((
                Position(spec.position),
                velocity,
                local_box(spec),
                enemy,
                health,
                sprite,
                animation,
            ))?
        }
        "coin" | "key" | "heart" => {
            let item = match spec.kind.as_str() {
                "coin" => Item::Coin,
                "key" => Item::Key,
                _ => Item::Heart,
            };
            let sprite = sprite(world, &spec.kind, 1)?;
            world.create_entity((Position(spec.position), local_box(spec), Pickable(item), sprite))?
        }
        other => anyhow::bail!("unknown object kind '{other}' at {:?}", spec.position),
    };
    log::trace!("Spawned {} as {entity}", spec.kind);
    Ok(entity)
}
