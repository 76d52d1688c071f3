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

//! Event delivery: the per-world [`EventQueue`] and the scene's [`EventManager`].
//!
//! Systems only ever *queue* events. Delivery happens in the scheduler's drain
//! phase, where each popped event is handed to the manager, whose handlers may
//! queue further events that are delivered in the same drain.

mod manager;
mod queue;

pub use manager::{EventManager, HandlerFn, MethodFn, SubscriptionId};
pub use queue::EventQueue;
