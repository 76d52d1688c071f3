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

//! Headless runner: plays a scripted input sequence through the scenes and
//! logs what would be drawn.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use yazelc_core::input::Button;
use yazelc_core::render::{RenderItem, Renderer};
use yazelc_core::EngineConfig;
use yazelc_game::scenes::default_resources;
use yazelc_game::{AdventureScenes, PlayerCarryOver};
use yazelc_runtime::logging::init_logging;
use yazelc_runtime::{SceneDirector, ScriptedInput};

#[derive(Parser, Debug)]
#[command(name = "yazelc", about = "Runs the adventure headless with scripted input")]
struct Args {
    /// Engine configuration (RON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames; overrides the configuration.
    #[arg(long)]
    frames: Option<u64>,

    /// Scene to start in; overrides the configuration.
    #[arg(long)]
    scene: Option<String>,

    /// Save slot to start from.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Where to write the player state when the run ends.
    #[arg(long)]
    save: Option<PathBuf>,
}

/// Logs a summary of every frame instead of drawing it.
struct LogRenderer {
    scene: String,
    frame: u64,
}

impl Renderer for LogRenderer {
    fn present(&mut self, items: &[RenderItem]) -> anyhow::Result<()> {
        self.frame += 1;
        log::debug!("[{}] frame {}: {} item(s)", self.scene, self.frame, items.len());
        Ok(())
    }
}

/// Frame limit when neither the configuration nor the command line sets one.
const DEFAULT_MAX_FRAMES: u64 = 600;

fn demo_script() -> ScriptedInput {
    let mut frames: Vec<Vec<Button>> = Vec::new();
    frames.extend(std::iter::repeat(vec![Button::Right]).take(20));
    frames.push(vec![Button::Attack]);
    frames.extend(std::iter::repeat(vec![Button::Down]).take(30));
    frames.push(vec![Button::Attack]);
    frames.push(vec![Button::ToggleDebug]);
    frames.extend(std::iter::repeat(vec![Button::Right]).take(40));
    frames.push(vec![Button::Pause]);
    frames.extend(std::iter::repeat(vec![]).take(5));
    frames.push(vec![Button::Pause]);
    ScriptedInput::endless(frames)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.frames.is_some() {
        config.max_frames = args.frames;
    }
    if let Some(scene) = args.scene {
        config.start_scene = scene;
    }
    init_logging(&config.log_filter);

    let carry_over = match &args.load {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read save {}", path.display()))?;
            Some(PlayerCarryOver::from_bytes(&bytes)?)
        }
        None => None,
    };

    let resources = Rc::new(default_resources()?);
    let factory = AdventureScenes::new(resources, config.clone(), |scene: &str| {
        Box::new(LogRenderer {
            scene: scene.to_string(),
            frame: 0,
        }) as Box<dyn Renderer>
    });

    let max_frames = config.max_frames.or(Some(DEFAULT_MAX_FRAMES));
    let mut director = SceneDirector::new(factory, demo_script()).with_max_frames(max_frames);
    let summary = director.run_from(&config.start_scene, carry_over)?;
    log::info!(
        "{} frame(s) over {:?}, exit: {:?}",
        summary.frames,
        summary.scenes,
        summary.exit
    );

    if let Some(path) = &args.save {
        match director.factory().final_state() {
            Some(state) => {
                std::fs::write(path, state.to_bytes()?)
                    .with_context(|| format!("failed to write save {}", path.display()))?;
                log::info!("Saved player state to {}", path.display());
            }
            None => log::warn!("No player left to save"),
        }
    }
    Ok(())
}
