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

//! Scene transitions, carry-over and scene-scoped subscriptions.

use std::cell::RefCell;
use std::rc::Rc;

use yazelc_core::input::{Button, InputSnapshot};
use yazelc_core::Event;
use yazelc_data::ecs::{Component, LeaveRequest, World};
use yazelc_runtime::{
    ExitReason, FnProcessor, Scene, SceneDirector, SceneFactory, ScriptedInput,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Door {
    Enter(&'static str),
}

impl Event for Door {
    type Kind = ();

    fn kind(&self) -> Self::Kind {}
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
struct Coins(u32);

#[derive(Default)]
struct Ledger {
    entered: Vec<&'static str>,
}

impl Ledger {
    fn on_door(&mut self, event: &Door, world: &mut World<Door>) -> anyhow::Result<()> {
        let Door::Enter(target) = event;
        self.entered.push(*target);
        world.request_leave(LeaveRequest::Goto(target.to_string()));
        Ok(())
    }
}

/// "field" earns a coin per frame and leaves through a door when Interact
/// is pressed; "house" quits on Interact.
#[derive(Default)]
struct TwoRooms {
    ledgers: Vec<std::rc::Weak<RefCell<Ledger>>>,
    received: Vec<Option<u32>>,
    finished: Option<u32>,
}

impl SceneFactory for TwoRooms {
    type Event = Door;
    type CarryOver = u32;

    fn build(&mut self, target: &str, carry_over: Option<u32>) -> anyhow::Result<Scene<Door>> {
        self.received.push(carry_over);
        let mut world = World::default();
        world.create_entity((Coins(carry_over.unwrap_or(0)),))?;
        let mut scene = Scene::new(target, world);

        match target {
            "field" => {
                scene.add_processor(FnProcessor::new("earn", |world: &mut World<Door>| {
                    for (_, coins) in world.query_mut::<&mut Coins>() {
                        coins.0 += 1;
                    }
                    if world.input().is_pressed(Button::Interact) {
                        world.send(Door::Enter("house"));
                    }
                    Ok(())
                }));
                let ledger = Rc::new(RefCell::new(Ledger::default()));
                scene
                    .events_mut()
                    .subscribe_method((), &ledger, Ledger::on_door);
                self.ledgers.push(Rc::downgrade(&ledger));
                scene.keep_alive(ledger);
            }
            "house" => {
                scene.add_processor(FnProcessor::new("exit", |world: &mut World<Door>| {
                    if world.input().is_pressed(Button::Interact) {
                        world.request_leave(LeaveRequest::Quit);
                    }
                    Ok(())
                }));
            }
            other => anyhow::bail!("no room called '{other}'"),
        }
        Ok(scene)
    }

    fn carry_over(&self, world: &World<Door>) -> Option<u32> {
        world.query::<&Coins>().next().map(|(_, coins)| coins.0)
    }

    fn finish(&mut self, final_state: Option<u32>) {
        self.finished = final_state;
    }
}

#[test]
fn transition_carries_state_and_releases_the_old_scene() {
    // ARRANGE
    let script = ScriptedInput::new([
        vec![],
        vec![],
        vec![Button::Interact],
        vec![],
        vec![Button::Interact],
    ]);
    let mut director = SceneDirector::new(TwoRooms::default(), script);

    // ACT
    let summary = director.run("field").unwrap();

    // ASSERT
    assert_eq!(summary.exit, ExitReason::Quit);
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.scenes, vec!["field".to_string(), "house".to_string()]);
    assert_eq!(director.factory().received, vec![None, Some(3)]);
    // house adds no coins, so the final state is what entered it.
    assert_eq!(director.factory().finished, Some(3));
    // The ledger was owned by the field scene only.
    assert!(director.factory().ledgers[0].upgrade().is_none());
}

#[test]
fn frame_limit_and_input_closure_end_the_run() {
    let mut limited =
        SceneDirector::new(TwoRooms::default(), ScriptedInput::idle()).with_max_frames(Some(4));
    let summary = limited.run("field").unwrap();
    assert_eq!(summary.exit, ExitReason::FrameLimit);
    assert_eq!(summary.frames, 4);

    let script = ScriptedInput::new(vec![Vec::<Button>::new(); 2]);
    let mut closing = SceneDirector::new(TwoRooms::default(), script);
    let summary = closing.run("house").unwrap();
    assert_eq!(summary.exit, ExitReason::InputClosed);
    assert_eq!(summary.frames, 2);
}

#[test]
fn unknown_scene_fails_to_build() {
    let mut director = SceneDirector::new(TwoRooms::default(), ScriptedInput::idle());
    let error = director.run("attic").unwrap_err();
    assert!(format!("{error:#}").contains("no room called 'attic'"));
}

#[test]
fn frame_error_names_the_scene() {
    struct Broken;

    impl SceneFactory for Broken {
        type Event = Door;
        type CarryOver = ();

        fn build(&mut self, target: &str, _: Option<()>) -> anyhow::Result<Scene<Door>> {
            let mut scene = Scene::new(target, World::default());
            scene.add_processor(FnProcessor::new("fails", |_: &mut World<Door>| {
                anyhow::bail!("boom")
            }));
            Ok(scene)
        }

        fn carry_over(&self, _: &World<Door>) -> Option<()> {
            None
        }
    }

    let mut director = SceneDirector::new(Broken, ScriptedInput::idle());
    let message = format!("{:#}", director.run("cellar").unwrap_err());

    assert!(message.contains("scene 'cellar' aborted"));
    assert!(message.contains("processor 'fails' failed"));
    assert!(message.contains("boom"));
}
