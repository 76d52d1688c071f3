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

//! Gameplay chains driven through real scenes built by `AdventureScenes`.

use std::cell::RefCell;
use std::rc::Rc;

use yazelc_core::input::Button;
use yazelc_core::math::Vec2;
use yazelc_core::render::{RenderItem, RenderKind, Renderer};
use yazelc_core::EngineConfig;
use yazelc_data::ecs::{LeaveRequest, World};
use yazelc_game::components::{
    Enemy, Health, Inventory, Invulnerable, Item, Pickable, Player, Position, Velocity, Weapon,
};
use yazelc_game::processors::DEBUG_DEPTH;
use yazelc_game::scenes::default_resources;
use yazelc_game::state::Paused;
use yazelc_game::{AdventureScenes, EntryPoint, GameEvent};
use yazelc_runtime::{
    ExitReason, FrameOutcome, InputSource, Scene, SceneDirector, SceneFactory, ScriptedInput,
};

type Frames = Rc<RefCell<Vec<(String, Vec<RenderItem>)>>>;

struct Recorder {
    scene: String,
    frames: Frames,
}

impl Renderer for Recorder {
    fn present(&mut self, items: &[RenderItem]) -> anyhow::Result<()> {
        self.frames
            .borrow_mut()
            .push((self.scene.clone(), items.to_vec()));
        Ok(())
    }
}

fn factory(maps: &[(&str, &str)]) -> (AdventureScenes, Frames) {
    let frames: Frames = Rc::default();
    let sink = Rc::clone(&frames);
    let resources = Rc::new(default_resources().unwrap());
    let mut factory = AdventureScenes::new(resources, EngineConfig::default(), move |scene: &str| {
        Box::new(Recorder {
            scene: scene.to_string(),
            frames: Rc::clone(&sink),
        }) as Box<dyn Renderer>
    });
    for (name, source) in maps {
        factory = factory.with_map(*name, *source);
    }
    (factory, frames)
}

fn run(scene: &mut Scene<GameEvent>, script: &mut ScriptedInput, frames: usize) {
    for _ in 0..frames {
        let input = script.poll().expect("script long enough");
        assert_eq!(scene.run_frame(input).unwrap(), FrameOutcome::Continue);
    }
}

fn player(world: &World<GameEvent>) -> yazelc_data::ecs::EntityId {
    world.query::<&Player>().next().map(|(entity, _)| entity).unwrap()
}

fn texts(items: &[RenderItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match &item.kind {
            RenderKind::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

const PLAYER_AND_COIN: &str = r#"[
    (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player", properties: {"speed": Float(2.0)}),
    (position: (x: 4.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "coin"),
]"#;

#[test]
fn pickup_reaches_inventory_and_hud() {
    // ARRANGE
    let (mut factory, frames) = factory(&[("field", PLAYER_AND_COIN)]);
    let mut scene = factory.build("field", None).unwrap();
    let mut script = ScriptedInput::idle();

    // ACT
    run(&mut scene, &mut script, 2);

    // ASSERT
    let world = scene.world();
    let hero = player(world);
    assert_eq!(world.query::<&Pickable>().count(), 0);
    assert_eq!(
        world.component_for::<Inventory>(hero).unwrap(),
        &Inventory { coins: 1, keys: 0 }
    );
    let frames = frames.borrow();
    // The HUD learns about the pickup in the drain after the first render.
    assert!(texts(&frames[0].1).contains(&"Coins 0  Keys 0".to_string()));
    assert!(texts(&frames[1].1).contains(&"Coins 1  Keys 0".to_string()));
}

const LOCKED_DOOR: &str = r#"[
    (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player", properties: {"speed": Float(2.0)}),
    (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "key"),
    (
        position: (x: 20.0, y: 0.0),
        size: (x: 8.0, y: 8.0),
        kind: "door",
        properties: {
            "target": Str("cellar"),
            "entry_x": Float(50.0),
            "entry_y": Float(50.0),
            "walk_x": Float(60.0),
            "walk_y": Float(50.0),
            "locked": Bool(true),
        },
    ),
]"#;

const CELLAR: &str = r#"[
    (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player"),
]"#;

#[test]
fn door_transition_carries_the_player_over() {
    // ARRANGE
    let (factory, frames) = factory(&[("yard", LOCKED_DOOR), ("cellar", CELLAR)]);
    let script = ScriptedInput::endless(vec![vec![Button::Right]; 7]);
    let mut director = SceneDirector::new(factory, script).with_max_frames(Some(34));

    // ACT
    let summary = director.run("yard").unwrap();

    // ASSERT
    assert_eq!(summary.scenes, vec!["yard".to_string(), "cellar".to_string()]);
    assert_eq!(summary.exit, ExitReason::FrameLimit);
    assert_eq!(summary.frames, 34);

    let final_state = director.factory().final_state().unwrap();
    assert_eq!(final_state.inventory, Inventory { coins: 0, keys: 0 });
    assert_eq!(final_state.health, Health::full(6));
    assert_eq!(final_state.entry, None);

    let frames = frames.borrow();
    assert_eq!(frames.iter().filter(|(scene, _)| scene == "yard").count(), 7);
    let (scene, first_cellar_frame) = &frames[7];
    assert_eq!(scene, "cellar");
    assert!(first_cellar_frame
        .iter()
        .any(|item| matches!(item.kind, RenderKind::Fade { opacity } if opacity > 0.9)));

    // fade-in, then the walk-in ends on the target
    let (_, last) = frames.last().unwrap();
    assert!(last
        .iter()
        .any(|item| matches!(item.kind, RenderKind::Image { .. })
            && item.position == Vec2::new(60.0, 50.0)));
    assert!(!last
        .iter()
        .any(|item| matches!(item.kind, RenderKind::Fade { .. })));
}

#[test]
fn locked_door_without_key_blocks() {
    let map = r#"[
        (position: (x: 12.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player", properties: {"speed": Float(2.0)}),
        (
            position: (x: 20.0, y: 0.0),
            size: (x: 8.0, y: 8.0),
            kind: "door",
            properties: {"target": Str("cellar"), "entry_x": Float(0.0), "entry_y": Float(0.0), "locked": Bool(true)},
        ),
    ]"#;
    let (mut factory, _) = factory(&[("yard", map)]);
    let mut scene = factory.build("yard", None).unwrap();
    let mut script = ScriptedInput::new(vec![vec![Button::Right]; 3]);

    run(&mut scene, &mut script, 3);

    let world = scene.world();
    assert_eq!(
        world.component_for::<Position>(player(world)).unwrap().0,
        Vec2::new(12.0, 0.0)
    );
}

const SWORD_PRACTICE: &str = r#"[
    (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player"),
    (
        position: (x: 0.0, y: 14.0),
        size: (x: 8.0, y: 8.0),
        kind: "enemy",
        properties: {"vx": Float(0.0), "vy": Float(0.0), "health": Int(2)},
    ),
]"#;

#[test]
fn two_sword_hits_kill_and_drop_a_coin() {
    // ARRANGE
    let (mut factory, _) = factory(&[("dojo", SWORD_PRACTICE)]);
    let mut scene = factory.build("dojo", None).unwrap();
    let enemy = scene
        .world()
        .query::<&Enemy>()
        .next()
        .map(|(entity, _)| entity)
        .unwrap();
    let mut frames = vec![vec![Button::Attack]];
    frames.extend(vec![vec![]; 31]);
    frames.push(vec![Button::Attack]);
    frames.extend(vec![vec![]; 2]);
    let mut script = ScriptedInput::new(frames);

    // ACT: first swing
    run(&mut scene, &mut script, 1);

    // ASSERT
    let world = scene.world();
    assert_eq!(world.query::<&Weapon>().count(), 1);
    assert_eq!(world.component_for::<Health>(enemy).unwrap().current, 1);
    assert!(world.has_component::<Invulnerable>(enemy));

    // ACT: the sword is put away and the immunity wears off
    run(&mut scene, &mut script, 31);

    // ASSERT
    let world = scene.world();
    assert_eq!(world.query::<&Weapon>().count(), 0);
    assert!(!world.has_component::<Invulnerable>(enemy));
    assert_eq!(world.component_for::<Health>(enemy).unwrap().current, 1);

    // ACT: second swing, then the drop task runs
    run(&mut scene, &mut script, 2);

    // ASSERT
    let world = scene.world();
    assert!(!world.is_alive(enemy));
    let drops: Vec<(Item, Vec2)> = world
        .query::<(&Pickable, &Position)>()
        .map(|(_, (pickable, position))| (pickable.0, position.0))
        .collect();
    assert_eq!(drops, vec![(Item::Coin, Vec2::new(0.0, 14.0))]);
}

#[test]
fn pause_freezes_movement_until_resumed() {
    let (mut factory, frames) = factory(&[("field", PLAYER_AND_COIN)]);
    let mut scene = factory.build("field", None).unwrap();
    let mut script = ScriptedInput::new(vec![
        vec![Button::Pause],
        vec![Button::Down],
        vec![Button::Down],
        vec![Button::Pause],
        vec![Button::Down],
    ]);

    run(&mut scene, &mut script, 3);
    let hero = player(scene.world());
    assert_eq!(scene.world().singleton::<Paused>(), Some(&Paused(true)));
    assert_eq!(
        scene.world().component_for::<Position>(hero).unwrap().0,
        Vec2::ZERO
    );
    assert!(texts(&frames.borrow()[2].1).contains(&"PAUSED".to_string()));

    run(&mut scene, &mut script, 2);
    assert_eq!(scene.world().singleton::<Paused>(), Some(&Paused(false)));
    assert_eq!(
        scene.world().component_for::<Position>(hero).unwrap().0,
        Vec2::new(0.0, 2.0)
    );
}

#[test]
fn debug_toggle_draws_hit_boxes() {
    let map = r#"[
        (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player"),
        (position: (x: 40.0, y: 0.0), size: (x: 8.0, y: 40.0), kind: "wall"),
    ]"#;
    let (mut factory, frames) = factory(&[("field", map)]);
    let mut scene = factory.build("field", None).unwrap();
    let mut script = ScriptedInput::new(vec![vec![], vec![Button::ToggleDebug]]);

    run(&mut scene, &mut script, 2);

    assert!(scene.world().config().debug_mode);
    let frames = frames.borrow();
    let outlines = |items: &[RenderItem]| {
        items
            .iter()
            .filter(|item| matches!(item.kind, RenderKind::Outline { .. }))
            .map(|item| (item.depth, item.position))
            .collect::<Vec<_>>()
    };
    assert!(outlines(&frames[0].1).is_empty());
    let mut drawn = outlines(&frames[1].1);
    drawn.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
    assert_eq!(
        drawn,
        vec![(DEBUG_DEPTH, Vec2::ZERO), (DEBUG_DEPTH, Vec2::new(40.0, 0.0))]
    );
}

#[test]
fn player_death_quits() {
    let map = r#"[
        (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "player", properties: {"health": Int(1)}),
        (position: (x: 4.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "enemy", properties: {"damage": Int(1)}),
    ]"#;
    let (factory, _) = factory(&[("arena", map)]);
    let mut director = SceneDirector::new(factory, ScriptedInput::idle());

    let summary = director.run("arena").unwrap();

    assert_eq!(summary.exit, ExitReason::Quit);
    assert_eq!(summary.frames, 1);
    assert_eq!(director.factory().final_state().unwrap().health.current, 0);
}

#[test]
fn wall_turns_patrolling_enemy_around() {
    let map = r#"[
        (position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "enemy", properties: {"vx": Float(4.0)}),
        (position: (x: 10.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "wall"),
    ]"#;
    let (mut factory, _) = factory(&[("hall", map)]);
    let mut scene = factory.build("hall", None).unwrap();
    let mut script = ScriptedInput::idle();

    run(&mut scene, &mut script, 1);

    let world = scene.world();
    let (_, (position, velocity)) = world
        .query::<(&Position, &Velocity)>()
        .next()
        .unwrap();
    assert_eq!(position.0, Vec2::ZERO);
    assert_eq!(velocity.0, Vec2::new(-4.0, 0.0));
}

#[test]
fn entering_with_carry_over_restores_the_player() {
    let (mut factory, _) = factory(&[("cellar", CELLAR)]);
    let carry_over = yazelc_game::PlayerCarryOver {
        health: Health { current: 2, max: 6 },
        inventory: Inventory { coins: 5, keys: 1 },
        entry: Some(EntryPoint {
            position: Vec2::new(30.0, 30.0),
            walk_to: None,
        }),
    };

    let scene = factory.build("cellar", Some(carry_over.clone())).unwrap();

    let world = scene.world();
    let hero = player(world);
    assert_eq!(world.component_for::<Position>(hero).unwrap().0, Vec2::new(30.0, 30.0));
    assert_eq!(world.component_for::<Health>(hero).unwrap(), &carry_over.health);
    assert_eq!(world.component_for::<Inventory>(hero).unwrap(), &carry_over.inventory);
}

#[test]
fn bad_maps_fail_scene_construction() {
    let dragon = r#"[(position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "dragon")]"#;
    let doorless = r#"[(position: (x: 0.0, y: 0.0), size: (x: 8.0, y: 8.0), kind: "door")]"#;
    let (mut factory, _) = factory(&[("lair", dragon), ("porch", doorless)]);

    let error = factory.build("lair", None).err().unwrap();
    assert!(format!("{error:#}").contains("unknown object kind 'dragon'"));

    let error = factory.build("porch", None).err().unwrap();
    assert!(format!("{error:#}").contains("has no target"));

    let error = factory.build("nowhere", None).err().unwrap();
    assert!(format!("{error:#}").contains("no map for scene 'nowhere'"));
}

#[test]
fn bundled_maps_build() {
    let (mut factory, _) = factory(&[]);
    for name in ["overworld", "dungeon"] {
        let mut scene = factory.build(name, None).unwrap();
        assert_eq!(scene.world().query::<&Player>().count(), 1);
        let outcome = scene.run_frame(Default::default()).unwrap();
        assert_ne!(outcome, FrameOutcome::Leave(LeaveRequest::Quit));
    }
}
