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

//! Event handlers: the game rules reacting to collisions and their
//! consequences. They are free functions registered with
//! [`register_handlers`], in the order listed there.
//!
//! Handlers tolerate events about entities deleted earlier in the same
//! drain: a missing component means the event no longer applies.

use yazelc_core::math::Vec2;
use yazelc_data::ecs::{EntityId, LeaveRequest, World};
use yazelc_data::event::EventManager;
use yazelc_runtime::task::SpawnOnce;
use yazelc_runtime::schedule_task;

use crate::components::{
    Door, Enemy, Health, HitBox, Inventory, Invulnerable, Item, Pickable, Player, Position,
    Sprite, Velocity, Wall, Weapon,
};
use crate::events::{GameEvent, GameEventKind};
use crate::scenes::EntryPoint;
use crate::state::{Paused, PendingEntry};

/// Frames of immunity after taking damage.
pub const INVULNERABILITY_FRAMES: u32 = 30;

/// Hit points restored by a heart.
pub const HEART_HEAL: i32 = 2;

/// Subscribes every gameplay handler.
pub fn register_handlers(manager: &mut EventManager<GameEvent>) {
    manager.subscribe(GameEventKind::Collision, block_on_wall);
    manager.subscribe(GameEventKind::Collision, contact_damage);
    manager.subscribe(GameEventKind::Collision, weapon_hit);
    manager.subscribe(GameEventKind::Collision, pick_up);
    manager.subscribe(GameEventKind::Collision, enter_door);
    manager.subscribe(GameEventKind::Damage, apply_damage);
    manager.subscribe(GameEventKind::Died, on_died);
    manager.subscribe(GameEventKind::PickedUp, collect_item);
    manager.subscribe(GameEventKind::PauseRequested, toggle_pause);
    manager.subscribe(GameEventKind::WeaponExpired, expire_weapon);
    manager.subscribe(GameEventKind::InvulnerabilityEnded, end_invulnerability);
}

fn undo_move(world: &mut World<GameEvent>, mover: EntityId) -> Option<Vec2> {
    let velocity = world.try_component::<Velocity>(mover)?.0;
    let position = world.try_component_mut::<Position>(mover)?;
    position.0 -= velocity;
    Some(velocity)
}

/// Pushes a mover that walked into a wall back by its velocity. Enemies
/// also turn around.
pub fn block_on_wall(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Collision { mover, other } = *event else {
        return Ok(());
    };
    if !world.has_component::<Wall>(other) {
        return Ok(());
    }

    if let Some(velocity) = undo_move(world, mover) {
        if world.has_component::<Enemy>(mover) {
            world.component_for_mut::<Velocity>(mover)?.0 = -velocity;
        }
    }
    Ok(())
}

/// An enemy touching the player hurts it.
pub fn contact_damage(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Collision { mover, other } = *event else {
        return Ok(());
    };
    if !world.has_component::<Player>(mover) {
        return Ok(());
    }
    if let Some(enemy) = world.try_component::<Enemy>(other).copied() {
        world.send(GameEvent::Damage {
            target: mover,
            amount: enemy.damage,
            source: other,
        });
    }
    Ok(())
}

/// A sword overlapping an enemy hurts it.
pub fn weapon_hit(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Collision { mover, other } = *event else {
        return Ok(());
    };
    if !world.has_component::<Enemy>(mover) {
        return Ok(());
    }
    if let Some(weapon) = world.try_component::<Weapon>(other).copied() {
        world.send(GameEvent::Damage {
            target: mover,
            amount: weapon.damage,
            source: weapon.owner,
        });
    }
    Ok(())
}

/// The player walking over an item removes it from the map.
pub fn pick_up(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Collision { mover, other } = *event else {
        return Ok(());
    };
    if !world.has_component::<Player>(mover) {
        return Ok(());
    }
    if let Some(Pickable(item)) = world.try_component::<Pickable>(other).copied() {
        world.delete_entity(other)?;
        world.send(GameEvent::PickedUp {
            picker: mover,
            item,
        });
    }
    Ok(())
}

/// The player reaching a door leaves the scene. A locked door takes a key,
/// or blocks like a wall.
pub fn enter_door(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Collision { mover, other } = *event else {
        return Ok(());
    };
    if !world.has_component::<Player>(mover) {
        return Ok(());
    }
    let Some(door) = world.try_component::<Door>(other).cloned() else {
        return Ok(());
    };

    if door.locked {
        let Some(inventory) = world.try_component_mut::<Inventory>(mover) else {
            undo_move(world, mover);
            return Ok(());
        };
        if inventory.keys == 0 {
            undo_move(world, mover);
            return Ok(());
        }
        inventory.keys -= 1;
        world.component_for_mut::<Door>(other)?.locked = false;
        world.send(GameEvent::InventoryChanged(mover));
        log::info!("Door {other} unlocked");
    }

    world.insert_singleton(PendingEntry(EntryPoint {
        position: door.entry,
        walk_to: door.walk_to,
    }));
    world.request_leave(LeaveRequest::Goto(door.target));
    Ok(())
}

/// Removes hit points, grants temporary immunity and reports the change.
pub fn apply_damage(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Damage { target, amount, .. } = *event else {
        return Ok(());
    };
    if world.has_component::<Invulnerable>(target) {
        return Ok(());
    }
    let Some(health) = world.try_component_mut::<Health>(target) else {
        return Ok(());
    };

    health.current -= amount;
    let Health { current, max } = *health;
    world.send(GameEvent::HealthChanged {
        entity: target,
        current,
        max,
    });

    if current <= 0 {
        world.send(GameEvent::Died(target));
    } else {
        world.add_component(target, Invulnerable)?;
        world.send_delayed(GameEvent::InvulnerabilityEnded(target), INVULNERABILITY_FRAMES);
    }
    Ok(())
}

/// Dead enemies vanish and drop a coin; a dead player ends the game.
pub fn on_died(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::Died(entity) = *event else {
        return Ok(());
    };
    if !world.is_alive(entity) {
        return Ok(());
    }

    if world.has_component::<Player>(entity) {
        log::info!("Player {entity} died, game over");
        world.request_leave(LeaveRequest::Quit);
        return Ok(());
    }

    let at = world.try_component::<Position>(entity).map(|p| p.0);
    world.delete_entity(entity)?;
    if let Some(at) = at {
        let texture = world.resources().get_texture("coin")?.id;
        schedule_task(
            world,
            SpawnOnce::new(
                "coin drop",
                (
                    Position(at),
                    HitBox::new(0.0, 0.0, 8.0, 8.0),
                    Pickable(Item::Coin),
                    Sprite {
                        texture,
                        source: None,
                        depth: 1,
                    },
                ),
            ),
        );
    }
    Ok(())
}

/// Adds a picked item to the inventory, or heals for hearts.
pub fn collect_item(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let GameEvent::PickedUp { picker, item } = *event else {
        return Ok(());
    };

    match item {
        Item::Heart => {
            let Some(health) = world.try_component_mut::<Health>(picker) else {
                return Ok(());
            };
            health.current = (health.current + HEART_HEAL).min(health.max);
            let Health { current, max } = *health;
            world.send(GameEvent::HealthChanged {
                entity: picker,
                current,
                max,
            });
        }
        Item::Coin | Item::Key => {
            let Some(inventory) = world.try_component_mut::<Inventory>(picker) else {
                return Ok(());
            };
            match item {
                Item::Coin => inventory.coins += 1,
                _ => inventory.keys += 1,
            }
            world.send(GameEvent::InventoryChanged(picker));
        }
    }
    Ok(())
}

/// Flips the pause flag.
pub fn toggle_pause(_event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    let paused = world.singletons_mut().get_or_default::<Paused>();
    paused.0 = !paused.0;
    log::info!("{}", if paused.0 { "Paused" } else { "Resumed" });
    Ok(())
}

/// Removes a sword whose swing is over.
pub fn expire_weapon(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    if let GameEvent::WeaponExpired(sword) = *event {
        if world.is_alive(sword) {
            world.delete_entity(sword)?;
        }
    }
    Ok(())
}

/// Ends post-hit immunity.
pub fn end_invulnerability(event: &GameEvent, world: &mut World<GameEvent>) -> anyhow::Result<()> {
    if let GameEvent::InvulnerabilityEnded(entity) = *event {
        if world.has_component::<Invulnerable>(entity) {
            world.remove_component::<Invulnerable>(entity)?;
        }
    }
    Ok(())
}
