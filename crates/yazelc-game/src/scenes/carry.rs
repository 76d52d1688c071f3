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

use serde::{Deserialize, Serialize};
use yazelc_core::math::Vec2;

use crate::components::{Health, Inventory};

/// Where the player appears when entering a scene through a door.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Spawn position.
    pub position: Vec2,
    /// Position the player walks to during the entry cutscene.
    pub walk_to: Option<Vec2>,
}

/// The player state handed from one scene to the next.
///
/// The next scene spawns a fresh player entity from these values; the old
/// entity id is never reused across worlds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCarryOver {
    /// Hit points.
    pub health: Health,
    /// Carried items.
    pub inventory: Inventory,
    /// Set when leaving through a door.
    pub entry: Option<EntryPoint>,
}

impl PlayerCarryOver {
    /// Encodes the carry-over for a save slot.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    /// Decodes a save slot written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let (carry_over, _) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(carry_over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_slot_survives_encoding() {
        let carry_over = PlayerCarryOver {
            health: Health { current: 3, max: 6 },
            inventory: Inventory { coins: 12, keys: 1 },
            entry: Some(EntryPoint {
                position: Vec2::new(16.0, 60.0),
                walk_to: None,
            }),
        };

        let bytes = carry_over.to_bytes().unwrap();
        assert_eq!(PlayerCarryOver::from_bytes(&bytes).unwrap(), carry_over);
    }

    #[test]
    fn truncated_save_is_rejected() {
        let bytes = PlayerCarryOver {
            health: Health::full(6),
            inventory: Inventory::default(),
            entry: None,
        }
        .to_bytes()
        .unwrap();

        assert!(PlayerCarryOver::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
