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

//! The heads-up display model.
//!
//! The HUD is not an entity. It lives in an `Rc<RefCell<Hud>>` owned by the
//! scene, and its methods are subscribed to the event manager as bound
//! handlers, so the subscriptions die with the scene.

use yazelc_data::ecs::World;

use crate::components::{Inventory, Player};
use crate::events::GameEvent;

/// What the HUD shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    /// Player hit points.
    pub health: i32,
    /// Player maximum hit points.
    pub max_health: i32,
    /// Player coins.
    pub coins: u32,
    /// Player keys.
    pub keys: u32,
    /// Whether the pause banner is shown.
    pub paused: bool,
}

impl Hud {
    /// Handles [`GameEvent::HealthChanged`] for the player.
    pub fn on_health_changed(
        &mut self,
        event: &GameEvent,
        world: &mut World<GameEvent>,
    ) -> anyhow::Result<()> {
        if let GameEvent::HealthChanged {
            entity,
            current,
            max,
        } = *event
        {
            if world.has_component::<Player>(entity) {
                self.health = current;
                self.max_health = max;
            }
        }
        Ok(())
    }

    /// Handles [`GameEvent::InventoryChanged`] for the player.
    pub fn on_inventory_changed(
        &mut self,
        event: &GameEvent,
        world: &mut World<GameEvent>,
    ) -> anyhow::Result<()> {
        if let GameEvent::InventoryChanged(entity) = *event {
            if world.has_component::<Player>(entity) {
                let inventory = world.component_for::<Inventory>(entity)?;
                self.coins = inventory.coins;
                self.keys = inventory.keys;
            }
        }
        Ok(())
    }

    /// Handles [`GameEvent::PauseRequested`].
    pub fn on_pause(
        &mut self,
        _event: &GameEvent,
        _world: &mut World<GameEvent>,
    ) -> anyhow::Result<()> {
        self.paused = !self.paused;
        Ok(())
    }

    /// The text lines to draw, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("HP {}/{}", self.health, self.max_health),
            format!("Coins {}  Keys {}", self.coins, self.keys),
        ];
        if self.paused {
            lines.push("PAUSED".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_banner_toggles() {
        let mut hud = Hud {
            health: 3,
            max_health: 6,
            ..Hud::default()
        };
        let mut world = World::default();

        hud.on_pause(&GameEvent::PauseRequested, &mut world).unwrap();
        assert_eq!(hud.lines(), vec!["HP 3/6", "Coins 0  Keys 0", "PAUSED"]);

        hud.on_pause(&GameEvent::PauseRequested, &mut world).unwrap();
        assert_eq!(hud.lines().len(), 2);
    }
}
