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

//! A type-map of per-world values that are not attached to any entity.
//!
//! Game state such as the HUD model, the pause flag or a task inbox lives
//! here instead of on a dummy entity. Each type has at most one value.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A singleton store keyed by [`TypeId`].
///
/// # Example
///
/// ```rust
/// use yazelc_data::ecs::Singletons;
///
/// struct Paused(bool);
///
/// let mut singletons = Singletons::new();
/// singletons.insert(Paused(true));
/// assert!(singletons.get::<Paused>().unwrap().0);
/// ```
#[derive(Default)]
pub struct Singletons {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Singletons {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Returns a shared reference to the value of type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Returns a mutable reference to the value of type `T`.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<T>())
    }

    /// Returns the value of type `T`, inserting `T::default()` first if absent.
    pub fn get_or_default<T: Default + 'static>(&mut self) -> &mut T {
        let boxed = self
            .values
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));
        match boxed.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("singleton keyed by a foreign TypeId"),
        }
    }

    /// Removes and returns the value of type `T`.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Returns `true` if a value of type `T` is stored.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Score(u32);

    #[derive(Debug, Default, PartialEq)]
    struct Paused(bool);

    #[test]
    fn insert_replaces_and_returns_old() {
        let mut singletons = Singletons::new();
        assert_eq!(singletons.insert(Score(1)), None);
        assert_eq!(singletons.insert(Score(2)), Some(Score(1)));
        assert_eq!(singletons.get::<Score>(), Some(&Score(2)));
        assert_eq!(singletons.len(), 1);
    }

    #[test]
    fn get_or_default_inserts_once() {
        let mut singletons = Singletons::new();
        singletons.get_or_default::<Paused>().0 = true;
        assert_eq!(singletons.get::<Paused>(), Some(&Paused(true)));
        assert_eq!(singletons.remove::<Paused>(), Some(Paused(true)));
        assert!(singletons.is_empty());
    }
}
