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

//! Name-keyed, read-only access to textures, fonts, sounds and animation strips.
//!
//! Resources are registered once while a scene is being set up, through a
//! [`ResourceManagerBuilder`] or a RON [`ResourceManifest`]. Building freezes
//! them into a [`ResourceManager`] that exposes lookups only, so nothing can
//! mutate it while processors run.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::math::Rect;

/// The families of resources the manager knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An image.
    Texture,
    /// A font face at a fixed size.
    Font,
    /// A sound effect or music track.
    Sound,
    /// A sequence of frames cut from a texture.
    AnimationStrip,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Texture => "texture",
            ResourceKind::Font => "font",
            ResourceKind::Sound => "sound",
            ResourceKind::AnimationStrip => "animation strip",
        };
        f.write_str(name)
    }
}

/// An opaque handle the renderer resolves to a GPU/CPU image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// An opaque handle the renderer resolves to a font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(pub u32);

/// An opaque handle the audio backend resolves to a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// A registered image and its cached dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Handle passed to the renderer.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A registered font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    /// Handle passed to the renderer.
    pub id: FontId,
    /// Point size.
    pub size: u32,
}

/// A registered sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sound {
    /// Handle passed to the audio backend.
    pub id: SoundId,
    /// Length of the sample.
    pub duration_ms: u32,
}

/// Frames cut from a single texture, played at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStrip {
    /// The texture the frames are cut from.
    pub texture: TextureId,
    /// Source rectangles, in play order.
    pub frames: Vec<Rect>,
    /// How many game frames each animation frame stays on screen.
    pub frame_duration: u32,
}

/// The frozen, read-only resource set of a scene.
#[derive(Debug, Default)]
pub struct ResourceManager {
    textures: HashMap<String, Texture>,
    fonts: HashMap<String, Font>,
    sounds: HashMap<String, Sound>,
    animation_strips: HashMap<String, AnimationStrip>,
}

fn lookup<'a, T>(
    map: &'a HashMap<String, T>,
    kind: ResourceKind,
    name: &str,
) -> Result<&'a T, EngineError> {
    map.get(name).ok_or_else(|| EngineError::UnknownResource {
        kind,
        name: name.to_string(),
    })
}

impl ResourceManager {
    /// Starts registering resources.
    pub fn builder() -> ResourceManagerBuilder {
        ResourceManagerBuilder::default()
    }

    /// Looks up a texture by name.
    pub fn get_texture(&self, name: &str) -> Result<&Texture, EngineError> {
        lookup(&self.textures, ResourceKind::Texture, name)
    }

    /// Looks up a font by name.
    pub fn get_font(&self, name: &str) -> Result<&Font, EngineError> {
        lookup(&self.fonts, ResourceKind::Font, name)
    }

    /// Looks up a sound by name.
    pub fn get_sound(&self, name: &str) -> Result<&Sound, EngineError> {
        lookup(&self.sounds, ResourceKind::Sound, name)
    }

    /// Looks up an animation strip by name.
    pub fn get_animation_strip(&self, name: &str) -> Result<&AnimationStrip, EngineError> {
        lookup(&self.animation_strips, ResourceKind::AnimationStrip, name)
    }

    /// Total number of registered resources of every kind.
    pub fn len(&self) -> usize {
        self.textures.len() + self.fonts.len() + self.sounds.len() + self.animation_strips.len()
    }

    /// Returns `true` if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declarative description of an animation strip: `frame_count` frames of
/// `frame_width` x `frame_height` laid out left to right in `texture`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDecl {
    /// Strip name.
    pub name: String,
    /// Name of an already declared texture.
    pub texture: String,
    /// Number of frames.
    pub frame_count: u32,
    /// Width of one frame in pixels.
    pub frame_width: u32,
    /// Height of one frame in pixels.
    pub frame_height: u32,
    /// Game frames per animation frame.
    pub frame_duration: u32,
}

/// A texture entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDecl {
    /// Texture name.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A font entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDecl {
    /// Font name.
    pub name: String,
    /// Point size.
    pub size: u32,
}

/// A sound entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundDecl {
    /// Sound name.
    pub name: String,
    /// Length of the sample.
    pub duration_ms: u32,
}

/// The RON form of a scene's resource set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceManifest {
    /// Textures to register.
    pub textures: Vec<TextureDecl>,
    /// Fonts to register.
    pub fonts: Vec<FontDecl>,
    /// Sounds to register.
    pub sounds: Vec<SoundDecl>,
    /// Animation strips to register; their textures must be listed above.
    pub animations: Vec<AnimationDecl>,
}

impl ResourceManifest {
    /// Parses a manifest from RON text.
    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Registers every entry and freezes the result.
    pub fn build(&self) -> Result<ResourceManager, EngineError> {
        let mut builder = ResourceManager::builder();
        for texture in &self.textures {
            builder.add_texture(&texture.name, texture.width, texture.height);
        }
        for font in &self.fonts {
            builder.add_font(&font.name, font.size);
        }
        for sound in &self.sounds {
            builder.add_sound(&sound.name, sound.duration_ms);
        }
        for animation in &self.animations {
            builder.add_animation(animation.clone());
        }
        builder.build()
    }
}

/// Collects resources during scene setup.
#[derive(Debug, Default)]
pub struct ResourceManagerBuilder {
    next_handle: u32,
    manager: ResourceManager,
    pending_animations: Vec<AnimationDecl>,
}

impl ResourceManagerBuilder {
    fn next_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    /// Registers a texture, replacing any previous one with the same name.
    pub fn add_texture(&mut self, name: &str, width: u32, height: u32) -> &mut Self {
        let id = TextureId(self.next_handle());
        self.manager.textures.insert(
            name.to_string(),
            Texture { id, width, height },
        );
        self
    }

    /// Registers a font.
    pub fn add_font(&mut self, name: &str, size: u32) -> &mut Self {
        let id = FontId(self.next_handle());
        self.manager
            .fonts
            .insert(name.to_string(), Font { id, size });
        self
    }

    /// Registers a sound.
    pub fn add_sound(&mut self, name: &str, duration_ms: u32) -> &mut Self {
        let id = SoundId(self.next_handle());
        self.manager
            .sounds
            .insert(name.to_string(), Sound { id, duration_ms });
        self
    }

    /// Declares an animation strip. Its texture is resolved in [`build`](Self::build).
    pub fn add_animation(&mut self, decl: AnimationDecl) -> &mut Self {
        self.pending_animations.push(decl);
        self
    }

    /// Resolves animation strips and freezes the set.
    ///
    /// Fails with `UnknownResource` if an animation references an
    /// unregistered texture.
    pub fn build(mut self) -> Result<ResourceManager, EngineError> {
        for decl in std::mem::take(&mut self.pending_animations) {
            let texture = self.manager.get_texture(&decl.texture)?.id;
            let frames = (0..decl.frame_count)
                .map(|i| {
                    Rect::new(
                        (i * decl.frame_width) as f32,
                        0.0,
                        decl.frame_width as f32,
                        decl.frame_height as f32,
                    )
                })
                .collect();
            self.manager.animation_strips.insert(
                decl.name,
                AnimationStrip {
                    texture,
                    frames,
                    frame_duration: decl.frame_duration.max(1),
                },
            );
        }
        log::debug!("Resource manager frozen with {} entries", self.manager.len());
        Ok(self.manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"(
        textures: [(name: "hero", width: 64, height: 16)],
        fonts: [(name: "hud", size: 8)],
        sounds: [(name: "hit", duration_ms: 120)],
        animations: [(
            name: "hero_walk",
            texture: "hero",
            frame_count: 4,
            frame_width: 16,
            frame_height: 16,
            frame_duration: 6,
        )],
    )"#;

    #[test]
    fn manifest_registers_every_kind() {
        let manager = ResourceManifest::from_ron_str(MANIFEST)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(manager.len(), 4);

        let hero = manager.get_texture("hero").unwrap();
        assert_eq!((hero.width, hero.height), (64, 16));
        assert_eq!(manager.get_font("hud").unwrap().size, 8);
        assert_eq!(manager.get_sound("hit").unwrap().duration_ms, 120);

        let strip = manager.get_animation_strip("hero_walk").unwrap();
        assert_eq!(strip.texture, hero.id);
        assert_eq!(strip.frames.len(), 4);
        assert_eq!(strip.frames[3], Rect::new(48.0, 0.0, 16.0, 16.0));
    }

    #[test]
    fn misses_are_reported_with_their_kind() {
        let manager = ResourceManager::default();
        assert_eq!(
            manager.get_sound("boom").unwrap_err(),
            EngineError::UnknownResource {
                kind: ResourceKind::Sound,
                name: "boom".to_string(),
            }
        );
    }

    #[test]
    fn animation_on_missing_texture_fails_the_build() {
        let mut builder = ResourceManager::builder();
        builder.add_animation(AnimationDecl {
            name: "ghost".to_string(),
            texture: "nope".to_string(),
            frame_count: 2,
            frame_width: 8,
            frame_height: 8,
            frame_duration: 1,
        });
        assert!(matches!(
            builder.build(),
            Err(EngineError::UnknownResource {
                kind: ResourceKind::Texture,
                ..
            })
        ));
    }
}
