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

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use yazelc_core::math::Vec2;
use yazelc_core::render::{Anchor, RenderItem, RenderKind, RenderQueue, Renderer};
use yazelc_core::resources::FontId;
use yazelc_data::ecs::World;
use yazelc_runtime::Processor;

use crate::components::{HitBox, Position, Sprite};
use crate::events::GameEvent;
use crate::hud::Hud;
use crate::state::ScreenFade;

/// Depth of hit box outlines in debug mode.
pub const DEBUG_DEPTH: i32 = 900;

/// Depth of HUD text.
pub const HUD_DEPTH: i32 = 1000;

/// Depth of the screen fade, above everything else.
pub const FADE_DEPTH: i32 = i32::MAX;

const HUD_ORIGIN: Vec2 = Vec2::new(4.0, 4.0);
const HUD_LINE_HEIGHT: f32 = 12.0;

/// Collects the frame's drawables, sorts them by depth and hands them to
/// the [`Renderer`]. Must be the last processor of a scene.
pub struct RenderProcessor {
    renderer: Box<dyn Renderer>,
    hud: Option<(Rc<RefCell<Hud>>, FontId)>,
}

impl RenderProcessor {
    /// Draws through `renderer`.
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer,
            hud: None,
        }
    }

    /// Also draws the HUD model with `font`.
    pub fn with_hud(mut self, hud: Rc<RefCell<Hud>>, font: FontId) -> Self {
        self.hud = Some((hud, font));
        self
    }
}

impl Processor<GameEvent> for RenderProcessor {
    fn name(&self) -> &str {
        "render"
    }

    fn process(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        let mut queue = RenderQueue::new();

        for (_, (position, sprite)) in world.query::<(&Position, &Sprite)>() {
            queue.push(RenderItem {
                kind: RenderKind::Image {
                    texture: sprite.texture,
                    source: sprite.source,
                },
                depth: sprite.depth,
                position: position.0,
                anchor: Anchor::World,
            });
        }

        if world.config().debug_mode {
            for (_, (hit_box, position)) in world.query::<(&HitBox, Option<&Position>)>() {
                let rect = hit_box.world_rect(position);
                queue.push(RenderItem {
                    kind: RenderKind::Outline {
                        size: Vec2::new(rect.w, rect.h),
                    },
                    depth: DEBUG_DEPTH,
                    position: Vec2::new(rect.x, rect.y),
                    anchor: Anchor::World,
                });
            }
        }

        if let Some((hud, font)) = &self.hud {
            let hud = hud.try_borrow().context("HUD model is borrowed during render")?;
            for (row, text) in hud.lines().into_iter().enumerate() {
                queue.push(RenderItem {
                    kind: RenderKind::Text { font: *font, text },
                    depth: HUD_DEPTH,
                    position: HUD_ORIGIN + Vec2::new(0.0, row as f32 * HUD_LINE_HEIGHT),
                    anchor: Anchor::Screen,
                });
            }
        }

        if let Some(ScreenFade(opacity)) = world.singleton::<ScreenFade>().copied() {
            if opacity > 0.0 {
                queue.push(RenderItem {
                    kind: RenderKind::Fade { opacity },
                    depth: FADE_DEPTH,
                    position: Vec2::ZERO,
                    anchor: Anchor::Screen,
                });
            }
        }

        let items = queue.into_sorted();
        log::trace!("Presenting {} item(s)", items.len());
        self.renderer.present(&items)
    }
}
