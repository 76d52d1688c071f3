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

//! Runtime configuration owned by each `World`.
//!
//! The configuration is plain data loaded from RON. It replaces any kind of
//! process-wide mutable flag: systems that need a setting (e.g. the debug
//! overlay) read it from the world they are processing.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// The config content is not valid RON for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),
}

/// Engine-wide settings. Every field has a default so partial files are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Draw hitbox outlines and other debug overlays.
    pub debug_mode: bool,
    /// Upper bound of dispatches in a single drain phase before the frame
    /// fails with `EventQueueDivergence`.
    pub max_drain_iterations: usize,
    /// Stop the director after this many frames (headless runs and tests).
    pub max_frames: Option<u64>,
    /// Default `env_logger` filter when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Name of the scene the director builds first.
    pub start_scene: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            max_drain_iterations: 10_000,
            max_frames: None,
            log_filter: "info".to_string(),
            start_scene: "overworld".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(ConfigError::Parse)
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron_str(&source)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_ron_str("(debug_mode: true, max_frames: Some(120))")
            .expect("valid RON");
        assert!(config.debug_mode);
        assert_eq!(config.max_frames, Some(120));
        assert_eq!(config.max_drain_iterations, 10_000);
        assert_eq!(config.start_scene, "overworld");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = EngineConfig::from_ron_str("(debug_mode: maybe)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
