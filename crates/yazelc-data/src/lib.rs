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

//! # Yazelc Data
//!
//! The data layer of the runtime: the entity-component store every processor
//! reads and writes, and the event queue/manager pair that decouples them.

#![warn(missing_docs)]

// Lets `#[derive(Component)]` name `::yazelc_data` from inside this crate.
extern crate self as yazelc_data;

pub mod ecs;
pub mod event;
