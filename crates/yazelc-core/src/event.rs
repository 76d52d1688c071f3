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

//! The contract every event type must fulfil to travel through the queue.
//!
//! Events are plain immutable values. The runtime never inspects their
//! payload; it only needs to compare them (to collapse re-scheduled delayed
//! events) and to know their *kind*, which is what handlers subscribe to.

use std::fmt::Debug;
use std::hash::Hash;

/// An immutable notification of something that happened during a frame.
///
/// Implementors are usually a single game-level enum, with `Kind` being a
/// field-less mirror of its variants.
///
/// # Example
///
/// ```rust
/// use yazelc_core::Event;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Ping {
///     Hello(u32),
/// }
///
/// impl Event for Ping {
///     type Kind = &'static str;
///
///     fn kind(&self) -> Self::Kind {
///         "hello"
///     }
/// }
///
/// assert_eq!(Ping::Hello(1).kind(), "hello");
/// ```
pub trait Event: Clone + Eq + Hash + Debug + 'static {
    /// The discriminant handlers subscribe to.
    type Kind: Copy + Eq + Hash + Debug + 'static;

    /// Returns the kind of this event.
    fn kind(&self) -> Self::Kind;
}
