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

use yazelc_data::ecs::World;
use yazelc_runtime::Processor;

use crate::components::{AnimationState, Sprite};
use crate::events::GameEvent;
use crate::state::is_paused;

/// Steps looping animation strips and points sprites at the current frame.
#[derive(Debug, Default)]
pub struct AnimationProcessor;

impl Processor<GameEvent> for AnimationProcessor {
    fn name(&self) -> &str {
        "animation"
    }

    fn process(&mut self, world: &mut World<GameEvent>) -> anyhow::Result<()> {
        if is_paused(world) {
            return Ok(());
        }

        let resources = world.resources_handle();
        for (_, (animation, sprite)) in world.query_mut::<(&mut AnimationState, &mut Sprite)>() {
            let strip = resources.get_animation_strip(&animation.strip)?;
            if strip.frames.is_empty() {
                continue;
            }

            animation.elapsed += 1;
            if animation.elapsed >= strip.frame_duration {
                animation.elapsed = 0;
                animation.frame = (animation.frame + 1) % strip.frames.len();
            }
            sprite.texture = strip.texture;
            sprite.source = strip.frames.get(animation.frame).copied();
        }
        Ok(())
    }
}
