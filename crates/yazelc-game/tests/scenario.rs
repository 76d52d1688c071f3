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

//! A mover walking into a wall is pushed back by the collision chain.

use yazelc_core::input::InputState;
use yazelc_core::math::Vec2;
use yazelc_data::ecs::World;
use yazelc_data::event::EventManager;
use yazelc_game::components::{HitBox, Position, Velocity, Wall};
use yazelc_game::handlers::block_on_wall;
use yazelc_game::processors::{CollisionProcessor, MovementProcessor};
use yazelc_game::{GameEvent, GameEventKind};
use yazelc_runtime::{Scene, Scheduler};

#[test]
fn wall_reverts_the_move_that_entered_it() {
    // ARRANGE
    let mut world: World<GameEvent> = World::default();
    let mut manager = EventManager::new();
    manager.subscribe(GameEventKind::Collision, block_on_wall);
    let mut scheduler = Scheduler::new();
    scheduler.add(MovementProcessor).add(CollisionProcessor);

    let p = world
        .create_entity((Position::new(0.0, 0.0), Velocity::new(1.0, 0.0)))
        .unwrap();

    // ACT: a frame with nothing in the way
    let stats = scheduler.run_frame(&mut world, &mut manager).unwrap();

    // ASSERT
    assert_eq!(stats.dispatched, 0);
    assert_eq!(world.component_for::<Position>(p).unwrap().0, Vec2::new(1.0, 0.0));

    // ARRANGE: a wall right ahead
    world
        .create_entity((HitBox::new(1.0, 0.0, 1.0, 1.0), Wall))
        .unwrap();

    // ACT: P moves to (2, 0), collides, and is reverted
    let stats = scheduler.run_frame(&mut world, &mut manager).unwrap();

    // ASSERT
    assert_eq!(stats.dispatched, 1);
    assert_eq!(world.component_for::<Position>(p).unwrap().0, Vec2::new(1.0, 0.0));
    assert!(world.events().is_empty());
}

#[test]
fn same_scenario_through_a_scene() {
    let mut scene = Scene::new("scenario", World::<GameEvent>::default());
    scene
        .add_processor(MovementProcessor)
        .add_processor(CollisionProcessor);
    scene
        .events_mut()
        .subscribe(GameEventKind::Collision, block_on_wall);
    let p = scene
        .world_mut()
        .create_entity((Position::new(0.0, 0.0), Velocity::new(1.0, 0.0)))
        .unwrap();

    scene.run_frame(InputState::default()).unwrap();
    scene
        .world_mut()
        .create_entity((HitBox::new(1.0, 0.0, 1.0, 1.0), Wall))
        .unwrap();
    scene.run_frame(InputState::default()).unwrap();

    assert_eq!(
        scene.world().component_for::<Position>(p).unwrap(),
        &Position::new(1.0, 0.0)
    );
    assert_eq!(scene.last_frame().frame, 2);
}
