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

use yazelc_core::Event;
use yazelc_data::ecs::EntityId;

use crate::components::Item;

/// Everything that happens in the game and is reacted to by handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// `mover` overlaps `other` after this frame's movement.
    Collision {
        /// An entity with a velocity.
        mover: EntityId,
        /// The entity whose hit box it overlaps.
        other: EntityId,
    },
    /// `target` should lose `amount` hit points.
    Damage {
        /// Who gets hurt.
        target: EntityId,
        /// Hit points to remove.
        amount: i32,
        /// Who hurt it.
        source: EntityId,
    },
    /// An entity's health changed.
    HealthChanged {
        /// The entity.
        entity: EntityId,
        /// New hit points.
        current: i32,
        /// Maximum hit points.
        max: i32,
    },
    /// An entity ran out of health.
    Died(EntityId),
    /// `picker` collected `item`.
    PickedUp {
        /// The collector.
        picker: EntityId,
        /// What was collected.
        item: Item,
    },
    /// An entity's inventory changed.
    InventoryChanged(EntityId),
    /// The pause button was pressed.
    PauseRequested,
    /// A sword swing is over.
    WeaponExpired(EntityId),
    /// Post-hit immunity is over.
    InvulnerabilityEnded(EntityId),
}

/// Field-less mirror of [`GameEvent`], used for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    /// [`GameEvent::Collision`]
    Collision,
    /// [`GameEvent::Damage`]
    Damage,
    /// [`GameEvent::HealthChanged`]
    HealthChanged,
    /// [`GameEvent::Died`]
    Died,
    /// [`GameEvent::PickedUp`]
    PickedUp,
    /// [`GameEvent::InventoryChanged`]
    InventoryChanged,
    /// [`GameEvent::PauseRequested`]
    PauseRequested,
    /// [`GameEvent::WeaponExpired`]
    WeaponExpired,
    /// [`GameEvent::InvulnerabilityEnded`]
    InvulnerabilityEnded,
}

impl Event for GameEvent {
    type Kind = GameEventKind;

    fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::Collision { .. } => GameEventKind::Collision,
            GameEvent::Damage { .. } => GameEventKind::Damage,
            GameEvent::HealthChanged { .. } => GameEventKind::HealthChanged,
            GameEvent::Died(_) => GameEventKind::Died,
            GameEvent::PickedUp { .. } => GameEventKind::PickedUp,
            GameEvent::InventoryChanged(_) => GameEventKind::InventoryChanged,
            GameEvent::PauseRequested => GameEventKind::PauseRequested,
            GameEvent::WeaponExpired(_) => GameEventKind::WeaponExpired,
            GameEvent::InvulnerabilityEnded(_) => GameEventKind::InvulnerabilityEnded,
        }
    }
}
