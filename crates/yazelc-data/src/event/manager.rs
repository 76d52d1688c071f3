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

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use anyhow::Context;

use crate::ecs::World;
use yazelc_core::{EngineError, Event};

/// A free-function event handler.
pub type HandlerFn<E> = fn(&E, &mut World<E>) -> anyhow::Result<()>;

/// A method handler, bound to an owner held weakly by the manager.
pub type MethodFn<T, E> = fn(&mut T, &E, &mut World<E>) -> anyhow::Result<()>;

type ClosureHandler<E> = Box<dyn FnMut(&E, &mut World<E>) -> anyhow::Result<()>>;

/// Token identifying one subscription, usable with [`EventManager::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// What makes two subscriptions "the same handler".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandlerKey {
    Function(usize),
    Method { owner: usize, method: usize },
    /// Closures have no comparable identity.
    Unique,
}

/// A handler whose owner may disappear.
trait BoundHandler<E: Event> {
    fn is_alive(&self) -> bool;

    fn invoke(&self, event: &E, world: &mut World<E>) -> anyhow::Result<()>;
}

struct WeakMethod<T, E: Event> {
    owner: Weak<RefCell<T>>,
    method: MethodFn<T, E>,
}

impl<T: 'static, E: Event> BoundHandler<E> for WeakMethod<T, E> {
    fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }

    fn invoke(&self, event: &E, world: &mut World<E>) -> anyhow::Result<()> {
        // Dead owners are pruned before dispatch; an owner dropped by an
        // earlier handler of the same dispatch is simply skipped.
        let Some(owner) = self.owner.upgrade() else {
            return Ok(());
        };
        let mut owner = owner
            .try_borrow_mut()
            .map_err(|_| EngineError::SubscriberBusy {
                event: format!("{:?}", event.kind()),
            })?;
        (self.method)(&mut owner, event, world)
    }
}

enum Callback<E: Event> {
    Function(HandlerFn<E>),
    Closure(ClosureHandler<E>),
    Method(Box<dyn BoundHandler<E>>),
}

struct Subscription<E: Event> {
    id: SubscriptionId,
    key: HandlerKey,
    callback: Callback<E>,
}

impl<E: Event> Subscription<E> {
    fn is_alive(&self) -> bool {
        match &self.callback {
            Callback::Method(bound) => bound.is_alive(),
            Callback::Function(_) | Callback::Closure(_) => true,
        }
    }
}

/// The subscription registry and dispatcher of one scene.
///
/// Handlers subscribe to an event *kind*. Bound-method handlers are held
/// through a [`Weak`] reference: dropping the last `Rc` of the owner makes the
/// subscription inert, and it is removed on the next dispatch (or by
/// [`prune_expired`](Self::prune_expired)). The manager never keeps a
/// subscriber alive.
pub struct EventManager<E: Event> {
    subscribers: HashMap<E::Kind, Vec<Subscription<E>>>,
    next_id: u64,
}

impl<E: Event> Default for EventManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventManager<E> {
    /// Creates a manager with no subscriptions.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 0,
        }
    }

    fn register(
        &mut self,
        kind: E::Kind,
        key: HandlerKey,
        callback: Callback<E>,
    ) -> SubscriptionId {
        let list = self.subscribers.entry(kind).or_default();
        list.retain(Subscription::is_alive);

        if key != HandlerKey::Unique {
            if let Some(existing) = list.iter().find(|s| s.key == key) {
                return existing.id;
            }
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        list.push(Subscription { id, key, callback });
        id
    }

    /// Subscribes a free function. Subscribing the same function twice to
    /// the same kind returns the existing subscription.
    pub fn subscribe(&mut self, kind: E::Kind, handler: HandlerFn<E>) -> SubscriptionId {
        self.register(
            kind,
            HandlerKey::Function(handler as usize),
            Callback::Function(handler),
        )
    }

    /// Subscribes a closure. Every call creates a distinct subscription.
    pub fn subscribe_closure<F>(&mut self, kind: E::Kind, handler: F) -> SubscriptionId
    where
        F: FnMut(&E, &mut World<E>) -> anyhow::Result<()> + 'static,
    {
        self.register(kind, HandlerKey::Unique, Callback::Closure(Box::new(handler)))
    }

    /// Subscribes `method` bound to `owner`, holding the owner weakly.
    ///
    /// The pair `(owner, method)` is the handler's identity.
    pub fn subscribe_method<T: 'static>(
        &mut self,
        kind: E::Kind,
        owner: &Rc<RefCell<T>>,
        method: MethodFn<T, E>,
    ) -> SubscriptionId {
        let key = HandlerKey::Method {
            owner: Rc::as_ptr(owner) as *const () as usize,
            method: method as usize,
        };
        let bound = WeakMethod {
            owner: Rc::downgrade(owner),
            method,
        };
        self.register(kind, key, Callback::Method(Box::new(bound)))
    }

    /// Removes one subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.values_mut().any(|list| {
            let before = list.len();
            list.retain(|s| s.id != id);
            list.len() != before
        })
    }

    /// Removes a free-function subscription by identity.
    pub fn unsubscribe_fn(&mut self, kind: E::Kind, handler: HandlerFn<E>) -> bool {
        self.remove_key(kind, HandlerKey::Function(handler as usize))
    }

    /// Removes a bound-method subscription by identity.
    pub fn unsubscribe_method<T: 'static>(
        &mut self,
        kind: E::Kind,
        owner: &Rc<RefCell<T>>,
        method: MethodFn<T, E>,
    ) -> bool {
        self.remove_key(
            kind,
            HandlerKey::Method {
                owner: Rc::as_ptr(owner) as *const () as usize,
                method: method as usize,
            },
        )
    }

    fn remove_key(&mut self, kind: E::Kind, key: HandlerKey) -> bool {
        let Some(list) = self.subscribers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.key != key);
        list.len() != before
    }

    /// Removes every subscription of `kind`, or every subscription at all.
    pub fn unsubscribe_all(&mut self, kind: Option<E::Kind>) {
        match kind {
            Some(kind) => {
                self.subscribers.remove(&kind);
            }
            None => self.subscribers.clear(),
        }
    }

    /// Drops every subscription. Called when a scene is torn down.
    pub fn clear(&mut self) {
        self.unsubscribe_all(None);
    }

    /// Removes subscriptions whose owner has been dropped. Returns how many.
    pub fn prune_expired(&mut self) -> usize {
        let mut pruned = 0;
        for list in self.subscribers.values_mut() {
            let before = list.len();
            list.retain(Subscription::is_alive);
            pruned += before - list.len();
        }
        pruned
    }

    /// Delivers `event` to every live handler of its kind, in subscription
    /// order, and returns how many ran.
    ///
    /// Expired subscriptions are removed first and never invoked. A kind
    /// with no subscribers is not an error. The first handler error stops
    /// the dispatch and is returned.
    pub fn dispatch(&mut self, event: &E, world: &mut World<E>) -> anyhow::Result<usize> {
        let kind = event.kind();
        let Some(list) = self.subscribers.get_mut(&kind) else {
            log::trace!("No subscriber for {event:?}");
            return Ok(0);
        };

        let before = list.len();
        list.retain(Subscription::is_alive);
        if list.len() != before {
            log::debug!(
                "Pruned {} expired subscriber(s) of {kind:?}",
                before - list.len()
            );
        }

        log::trace!("Dispatching {event:?} to {} subscriber(s)", list.len());
        for subscription in list.iter_mut() {
            let outcome = match &mut subscription.callback {
                Callback::Function(handler) => handler(event, world),
                Callback::Closure(handler) => handler(event, world),
                Callback::Method(bound) => bound.invoke(event, world),
            };
            outcome.with_context(|| format!("handler {:?} failed on {event:?}", subscription.id))?;
        }
        Ok(list.len())
    }

    /// Number of live subscribers of `kind`.
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.subscribers
            .get(&kind)
            .map_or(0, |list| list.iter().filter(|s| s.is_alive()).count())
    }

    /// Number of stored subscriptions across all kinds, expired ones included.
    pub fn total_subscribers(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Signal {
        Ping(u32),
        Pong,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum SignalKind {
        Ping,
        Pong,
    }

    impl Event for Signal {
        type Kind = SignalKind;

        fn kind(&self) -> SignalKind {
            match self {
                Signal::Ping(_) => SignalKind::Ping,
                Signal::Pong => SignalKind::Pong,
            }
        }
    }

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn on_ping(&mut self, _event: &Signal, _world: &mut World<Signal>) -> anyhow::Result<()> {
            self.hits += 1;
            Ok(())
        }
    }

    fn reply(_event: &Signal, world: &mut World<Signal>) -> anyhow::Result<()> {
        world.send(Signal::Pong);
        Ok(())
    }

    #[test]
    fn dispatch_without_subscribers_is_a_no_op() {
        let mut manager = EventManager::new();
        let mut world = World::default();

        assert_eq!(manager.dispatch(&Signal::Pong, &mut world).unwrap(), 0);
    }

    #[test]
    fn same_function_is_only_registered_once() {
        let mut manager = EventManager::new();
        let mut world = World::default();

        let first = manager.subscribe(SignalKind::Ping, reply);
        let second = manager.subscribe(SignalKind::Ping, reply);
        assert_eq!(first, second);

        assert_eq!(manager.dispatch(&Signal::Ping(1), &mut world).unwrap(), 1);
        assert_eq!(world.events().len(), 1);
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let mut manager = EventManager::new();
        let mut world = World::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            manager.subscribe_closure(SignalKind::Ping, move |_, _| {
                log.borrow_mut().push(name);
                Ok(())
            });
        }
        manager.dispatch(&Signal::Ping(0), &mut world).unwrap();

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn dropped_owner_stops_receiving_and_is_pruned() {
        let mut manager = EventManager::new();
        let mut world = World::default();
        let baseline = manager.subscriber_count(SignalKind::Ping);

        let counter = Rc::new(RefCell::new(Counter::default()));
        manager.subscribe_method(SignalKind::Ping, &counter, Counter::on_ping);
        manager.subscribe_method(SignalKind::Ping, &counter, Counter::on_ping);
        manager.dispatch(&Signal::Ping(1), &mut world).unwrap();
        assert_eq!(counter.borrow().hits, 1);
        assert_eq!(manager.subscriber_count(SignalKind::Ping), baseline + 1);

        drop(counter);
        assert_eq!(manager.subscriber_count(SignalKind::Ping), baseline);
        assert_eq!(manager.dispatch(&Signal::Ping(2), &mut world).unwrap(), 0);
        assert_eq!(manager.total_subscribers(), 0);
    }

    #[test]
    fn busy_owner_is_reported() {
        let mut manager = EventManager::new();
        let mut world = World::default();
        let counter = Rc::new(RefCell::new(Counter::default()));
        manager.subscribe_method(SignalKind::Ping, &counter, Counter::on_ping);

        let _guard = counter.borrow_mut();
        let error = manager.dispatch(&Signal::Ping(1), &mut world).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<EngineError>(),
            Some(EngineError::SubscriberBusy { .. })
        ));
    }

    #[test]
    fn unsubscribe_variants() {
        let mut manager = EventManager::new();
        let counter = Rc::new(RefCell::new(Counter::default()));

        let closure = manager.subscribe_closure(SignalKind::Pong, |_, _| Ok(()));
        manager.subscribe(SignalKind::Ping, reply);
        manager.subscribe_method(SignalKind::Ping, &counter, Counter::on_ping);
        assert_eq!(manager.total_subscribers(), 3);

        assert!(manager.unsubscribe(closure));
        assert!(!manager.unsubscribe(closure));
        assert!(manager.unsubscribe_fn(SignalKind::Ping, reply));
        assert!(manager.unsubscribe_method(SignalKind::Ping, &counter, Counter::on_ping));
        assert_eq!(manager.total_subscribers(), 0);

        manager.subscribe(SignalKind::Ping, reply);
        manager.subscribe(SignalKind::Pong, reply);
        manager.unsubscribe_all(Some(SignalKind::Ping));
        assert_eq!(manager.subscriber_count(SignalKind::Pong), 1);
        manager.clear();
        assert_eq!(manager.total_subscribers(), 0);
    }

    #[test]
    fn handler_error_stops_the_dispatch() {
        let mut manager = EventManager::new();
        let mut world = World::default();
        let ran = Rc::new(RefCell::new(false));

        manager.subscribe_closure(SignalKind::Pong, |_, _| anyhow::bail!("broken"));
        let flag = Rc::clone(&ran);
        manager.subscribe_closure(SignalKind::Pong, move |_, _| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        assert!(manager.dispatch(&Signal::Pong, &mut world).is_err());
        assert!(!*ran.borrow());
    }
}
