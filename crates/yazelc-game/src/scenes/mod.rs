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

//! Scene construction: maps, processors, handlers and carry-over.

mod carry;
mod spawn;

pub use carry::{EntryPoint, PlayerCarryOver};
pub use spawn::spawn_object;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Context;
use yazelc_core::map::{MapSource, RonMapSource};
use yazelc_core::render::Renderer;
use yazelc_core::resources::{ResourceManager, ResourceManifest};
use yazelc_core::EngineConfig;
use yazelc_data::ecs::World;
use yazelc_runtime::{schedule_task, Scene, SceneFactory, TaskRunner};

use crate::components::{Health, Inventory, Player};
use crate::events::{GameEvent, GameEventKind};
use crate::handlers::register_handlers;
use crate::hud::Hud;
use crate::processors::{
    AnimationProcessor, CollisionProcessor, InputProcessor, MovementProcessor, RenderProcessor,
};
use crate::state::PendingEntry;
use crate::tasks::{Fade, MoveTo};

/// Frames of the fade-in after walking through a door.
pub const FADE_FRAMES: u32 = 15;

/// Frames of the walk-in after the fade.
pub const WALK_IN_FRAMES: u32 = 8;

const HUD_FONT: &str = "hud";

const BUILTIN_MAPS: [(&str, &str); 2] = [
    ("overworld", include_str!("../../assets/maps/overworld.ron")),
    ("dungeon", include_str!("../../assets/maps/dungeon.ron")),
];

/// Loads the bundled resource manifest.
pub fn default_resources() -> anyhow::Result<ResourceManager> {
    let manifest = ResourceManifest::from_ron_str(include_str!("../../assets/resources.ron"))
        .context("bundled resource manifest is invalid")?;
    Ok(manifest.build()?)
}

/// Builds a fresh [`Renderer`] for the named scene.
pub type RendererFactory = Box<dyn FnMut(&str) -> Box<dyn Renderer>>;

/// The game's [`SceneFactory`]: one scene per map.
pub struct AdventureScenes {
    resources: Rc<ResourceManager>,
    config: EngineConfig,
    maps: HashMap<String, String>,
    renderers: RendererFactory,
    final_state: Option<PlayerCarryOver>,
}

impl AdventureScenes {
    /// A factory with the bundled maps.
    pub fn new<R>(resources: Rc<ResourceManager>, config: EngineConfig, renderers: R) -> Self
    where
        R: FnMut(&str) -> Box<dyn Renderer> + 'static,
    {
        Self {
            resources,
            config,
            maps: BUILTIN_MAPS
                .iter()
                .map(|(name, source)| (name.to_string(), source.to_string()))
                .collect(),
            renderers: Box::new(renderers),
            final_state: None,
        }
    }

    /// Adds or replaces a map given as a RON spawn list.
    pub fn with_map(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.maps.insert(name.into(), source.into());
        self
    }

    /// The player state at the end of the last run.
    pub fn final_state(&self) -> Option<&PlayerCarryOver> {
        self.final_state.as_ref()
    }

    fn populate(
        &self,
        world: &mut World<GameEvent>,
        target: &str,
        carry_over: Option<&PlayerCarryOver>,
    ) -> anyhow::Result<()> {
        let source = self
            .maps
            .get(target)
            .with_context(|| format!("no map for scene '{target}'"))?;
        let map = RonMapSource::from_ron_str(source)
            .with_context(|| format!("map '{target}' is invalid"))?;

        for spec in map.spawn_specs() {
            spawn_object(world, &spec, carry_over)
                .with_context(|| format!("failed to populate '{target}'"))?;
        }
        Ok(())
    }
}

impl SceneFactory for AdventureScenes {
    type Event = GameEvent;
    type CarryOver = PlayerCarryOver;

    fn build(
        &mut self,
        target: &str,
        carry_over: Option<PlayerCarryOver>,
    ) -> anyhow::Result<Scene<GameEvent>> {
        let mut world = World::new(Rc::clone(&self.resources), self.config.clone());
        self.populate(&mut world, target, carry_over.as_ref())?;
        let font = world.resources().get_font(HUD_FONT)?.id;

        let mut hud = Hud::default();
        let player = world
            .query::<(&Player, &Health, &Inventory)>()
            .next()
            .map(|(entity, (_, health, inventory))| (entity, *health, *inventory));
        if let Some((_, health, inventory)) = player {
            hud.health = health.current;
            hud.max_health = health.max;
            hud.coins = inventory.coins;
            hud.keys = inventory.keys;
        }
        let hud = Rc::new(RefCell::new(hud));

        if let (Some((player, _, _)), Some(entry)) =
            (player, carry_over.and_then(|carry| carry.entry))
        {
            schedule_task(&mut world, Fade::fade_in(FADE_FRAMES));
            if let Some(walk_to) = entry.walk_to {
                schedule_task(&mut world, MoveTo::new(player, walk_to, WALK_IN_FRAMES));
            }
        }

        let renderer = (self.renderers)(target);
        let mut scene = Scene::new(target, world);
        scene
            .add_processor(InputProcessor)
            .add_processor(TaskRunner::new())
            .add_processor(MovementProcessor)
            .add_processor(AnimationProcessor)
            .add_processor(CollisionProcessor)
            .add_processor(RenderProcessor::new(renderer).with_hud(Rc::clone(&hud), font));

        let events = scene.events_mut();
        register_handlers(events);
        events.subscribe_method(GameEventKind::HealthChanged, &hud, Hud::on_health_changed);
        events.subscribe_method(GameEventKind::InventoryChanged, &hud, Hud::on_inventory_changed);
        events.subscribe_method(GameEventKind::PauseRequested, &hud, Hud::on_pause);
        scene.keep_alive(hud);

        Ok(scene)
    }

    fn carry_over(&self, world: &World<GameEvent>) -> Option<PlayerCarryOver> {
        let (_, (_, health, inventory)) = world.query::<(&Player, &Health, &Inventory)>().next()?;
        Some(PlayerCarryOver {
            health: *health,
            inventory: *inventory,
            entry: world.singleton::<PendingEntry>().map(|pending| pending.0),
        })
    }

    fn finish(&mut self, final_state: Option<PlayerCarryOver>) {
        self.final_state = final_state;
    }
}
