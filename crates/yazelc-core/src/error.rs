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

//! Defines the error taxonomy shared by every layer of the runtime.
//!
//! All of these are programmer-facing: they describe a logic bug in a
//! processor, a handler wiring mistake or a scene set up against missing
//! resources. None of them is meant to be shown to a player.

use crate::ecs::entity::EntityId;
use crate::resources::ResourceKind;

/// An error raised by the ECS, the event queue or the resource manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The entity was never created, or has already been deleted.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// A component the caller relies on is not attached to the entity.
    #[error("entity {entity} has no `{component}` component")]
    ComponentNotFound {
        /// The entity that was inspected.
        entity: EntityId,
        /// The type name of the missing component.
        component: &'static str,
    },

    /// A bundle listed the same component type more than once.
    #[error("bundle contains `{component}` more than once")]
    DuplicateComponent {
        /// The type name of the repeated component.
        component: &'static str,
    },

    /// A name-keyed resource lookup missed.
    #[error("unknown {kind} resource `{name}`")]
    UnknownResource {
        /// The family of resource that was requested.
        kind: ResourceKind,
        /// The name that was looked up.
        name: String,
    },

    /// `pop` was called on an empty immediate queue.
    #[error("event queue is empty")]
    EmptyQueue,

    /// The drain phase exceeded its iteration bound.
    #[error("event queue did not drain within {iterations} dispatches; `{event}` kept being produced")]
    EventQueueDivergence {
        /// The event kind dispatched most often during the runaway drain.
        event: String,
        /// The number of dispatches performed before giving up.
        iterations: usize,
    },

    /// A bound-method subscriber was already borrowed when its event arrived.
    #[error("subscriber for `{event}` is already borrowed")]
    SubscriberBusy {
        /// The event kind that was being dispatched.
        event: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let id = EntityId {
            index: 4,
            generation: 1,
        };
        let err = EngineError::ComponentNotFound {
            entity: id,
            component: "Health",
        };
        assert_eq!(err.to_string(), "entity 4v1 has no `Health` component");

        let err = EngineError::UnknownResource {
            kind: ResourceKind::Texture,
            name: "hero".to_string(),
        };
        assert_eq!(err.to_string(), "unknown texture resource `hero`");
    }
}
