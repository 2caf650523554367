//! # Event Bus
//!
//! In-process publish/subscribe keyed by an event-kind enum.
//!
//! Two kinds of subscription exist:
//!
//! - **Subscribers** are plain values (usually a component enum) registered per kind. The bus
//!   does not call them; [`EventBus::next_delivery`] hands back the event together with the
//!   subscribers registered for its kind, and the owner routes it with an exhaustive `match`.
//!   This keeps every handler free to borrow the owner's state mutably.
//! - **Passive listeners** are boxed callbacks for outside observers. They see each event
//!   exactly once, when it is delivered, and cannot touch engine state.
//!
//! Events published while a delivery is being handled are queued behind it, so publication is
//! re-entrant. The owner drains the queue before its step returns; nothing is carried over.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// An event that can travel on an [`EventBus`].
pub trait BusEvent: Clone + Debug {
    /// Closed enumeration of event kinds used as the routing key.
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

/// Callback invoked for every delivered event of a kind.
pub type PassiveListener<E> = Box<dyn FnMut(&E)>;

/// One event popped off the queue along with who should handle it.
#[derive(Debug)]
pub struct Delivery<E, S> {
    pub event: E,
    pub subscribers: Vec<S>,
}

pub struct EventBus<E: BusEvent, S> {
    subscribers: HashMap<E::Kind, Vec<S>>,
    listeners: HashMap<E::Kind, Vec<PassiveListener<E>>>,
    pending: VecDeque<E>,
    delivered: u64,
}

impl<E: BusEvent, S: Copy + PartialEq + Debug> Default for EventBus<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent, S: Copy + PartialEq + Debug> EventBus<E, S> {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            listeners: HashMap::new(),
            pending: VecDeque::new(),
            delivered: 0,
        }
    }

    /// Registers `subscriber` for `kind`. Registering the same pair twice has no effect.
    pub fn subscribe(&mut self, kind: E::Kind, subscriber: S) {
        let list = self.subscribers.entry(kind).or_default();
        if !list.contains(&subscriber) {
            list.push(subscriber);
        }
    }

    pub fn subscribers_of(&self, kind: E::Kind) -> &[S] {
        self.subscribers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registers an observer callback for `kind`.
    pub fn on_passive(&mut self, kind: E::Kind, listener: PassiveListener<E>) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    pub fn publish(&mut self, event: E) {
        trace!(kind = ?event.kind(), "Published");
        self.pending.push_back(event);
    }

    /// Pops the oldest pending event, runs its passive listeners and returns it with its
    /// subscribers. `None` once the queue is empty.
    pub fn next_delivery(&mut self) -> Option<Delivery<E, S>> {
        let event = self.pending.pop_front()?;
        let kind = event.kind();
        if let Some(listeners) = self.listeners.get_mut(&kind) {
            for listener in listeners.iter_mut() {
                listener(&event);
            }
        }
        self.delivered += 1;
        let subscribers = self.subscribers_of(kind).to_vec();
        Some(Delivery { event, subscribers })
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops everything still queued and returns how many events were discarded.
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Total number of events delivered over the bus's lifetime.
    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }
}
