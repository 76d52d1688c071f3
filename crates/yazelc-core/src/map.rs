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

//! The contract between the core and a tile/object map loader.
//!
//! Map formats (Tiled TMX and friends) are parsed elsewhere. The core only
//! consumes a flat sequence of [`SpawnSpec`]s and lets the game decide which
//! components each `kind` turns into.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// A free-form property value attached to a map object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
}

/// One object placed on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Top-left position in world units.
    pub position: Vec2,
    /// Size in world units.
    pub size: Vec2,
    /// What the object is (`"wall"`, `"door"`, `"enemy"`, ...).
    pub kind: String,
    /// Extra per-object data.
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl SpawnSpec {
    /// Returns a string property.
    pub fn str_property(&self, key: &str) -> Option<&str> {
        match self.properties.get(key) {
            Some(PropertyValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns an integer property.
    pub fn int_property(&self, key: &str) -> Option<i64> {
        match self.properties.get(key) {
            Some(PropertyValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a boolean property.
    pub fn bool_property(&self, key: &str) -> Option<bool> {
        match self.properties.get(key) {
            Some(PropertyValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a numeric property as `f32`, accepting integers too.
    pub fn float_property(&self, key: &str) -> Option<f32> {
        match self.properties.get(key) {
            Some(PropertyValue::Float(value)) => Some(*value as f32),
            Some(PropertyValue::Int(value)) => Some(*value as f32),
            _ => None,
        }
    }
}

/// Anything able to list the objects of a map.
pub trait MapSource {
    /// Returns every object of the map, in file order.
    fn spawn_specs(&self) -> Box<dyn Iterator<Item = SpawnSpec> + '_>;
}

/// A map stored as a RON list of [`SpawnSpec`]s.
#[derive(Debug, Clone, Default)]
pub struct RonMapSource {
    specs: Vec<SpawnSpec>,
}

impl RonMapSource {
    /// Parses a RON spawn list.
    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        let specs: Vec<SpawnSpec> = ron::from_str(source)?;
        Ok(Self { specs })
    }
}

impl MapSource for RonMapSource {
    fn spawn_specs(&self) -> Box<dyn Iterator<Item = SpawnSpec> + '_> {
        Box::new(self.specs.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_map_yields_specs_in_order() {
        let map = RonMapSource::from_ron_str(
            r#"[
                (position: (x: 0.0, y: 0.0), size: (x: 16.0, y: 16.0), kind: "wall"),
                (
                    position: (x: 32.0, y: 0.0),
                    size: (x: 16.0, y: 16.0),
                    kind: "door",
                    properties: {"target": Str("dungeon"), "entry_x": Int(8), "locked": Bool(true)},
                ),
            ]"#,
        )
        .expect("valid map");

        let specs: Vec<SpawnSpec> = map.spawn_specs().collect();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].kind, "wall");
        assert_eq!(specs[1].str_property("target"), Some("dungeon"));
        assert_eq!(specs[1].float_property("entry_x"), Some(8.0));
        assert_eq!(specs[1].bool_property("locked"), Some(true));
        assert_eq!(specs[1].int_property("missing"), None);
    }
}
