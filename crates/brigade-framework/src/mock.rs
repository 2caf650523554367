//! # Event Recording for Tests
//!
//! [`EventRecorder`] plugs into an [`EventBus`](crate::EventBus) as a passive listener and
//! keeps every event it sees. Tests then either inspect the recorded events directly or state
//! expectations up front and call [`EventRecorder::verify`] at the end.
//!
//! ```rust
//! use brigade_framework::mock::EventRecorder;
//! use brigade_framework::{BusEvent, EventBus};
//!
//! #[derive(Debug, Clone)] enum Bell { Ring }
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)] enum BellKind { Ring }
//! impl BusEvent for Bell {
//!     type Kind = BellKind;
//!     fn kind(&self) -> BellKind { BellKind::Ring }
//! }
//!
//! let mut bus = EventBus::<Bell, ()>::new();
//! let recorder = EventRecorder::<Bell>::new();
//! recorder.expect(BellKind::Ring).times(2);
//! bus.on_passive(BellKind::Ring, recorder.listener());
//!
//! bus.publish(Bell::Ring);
//! bus.publish(Bell::Ring);
//! while bus.next_delivery().is_some() {}
//!
//! recorder.verify();
//! ```

use crate::bus::{BusEvent, PassiveListener};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
enum Count {
    Exactly(usize),
    AtLeastOnce,
}

/// Represents an expected number of events of one kind.
#[derive(Debug)]
struct Expectation<K> {
    kind: K,
    count: Count,
}

/// A recorder with expectation tracking for fluent testing.
pub struct EventRecorder<E: BusEvent> {
    events: Rc<RefCell<Vec<E>>>,
    expectations: Rc<RefCell<Vec<Expectation<E::Kind>>>>,
}

impl<E: BusEvent + 'static> Default for EventRecorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent + 'static> EventRecorder<E> {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
            expectations: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A listener that appends every event it receives to this recorder.
    /// Register it once per kind of interest.
    pub fn listener(&self) -> PassiveListener<E> {
        let events = self.events.clone();
        Box::new(move |event: &E| events.borrow_mut().push(event.clone()))
    }

    /// All recorded events in delivery order.
    pub fn events(&self) -> Vec<E> {
        self.events.borrow().clone()
    }

    pub fn of_kind(&self, kind: E::Kind) -> Vec<E> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self, kind: E::Kind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Starts an expectation about events of `kind`.
    pub fn expect(&self, kind: E::Kind) -> ExpectationBuilder<E> {
        ExpectationBuilder {
            kind,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any expectation was not met.
    pub fn verify(&self) {
        for expectation in self.expectations.borrow().iter() {
            let seen = self.count(expectation.kind);
            match expectation.count {
                Count::Exactly(n) if seen != n => panic!(
                    "Expected {} {:?} event(s), recorded {}",
                    n, expectation.kind, seen
                ),
                Count::AtLeastOnce if seen == 0 => {
                    panic!("Expected at least one {:?} event, recorded none", expectation.kind)
                }
                _ => {}
            }
        }
    }
}

/// Builder for event-count expectations.
pub struct ExpectationBuilder<E: BusEvent> {
    kind: E::Kind,
    expectations: Rc<RefCell<Vec<Expectation<E::Kind>>>>,
}

impl<E: BusEvent> ExpectationBuilder<E> {
    pub fn times(self, n: usize) {
        self.push(Count::Exactly(n));
    }

    pub fn never(self) {
        self.push(Count::Exactly(0));
    }

    pub fn at_least_once(self) {
        self.push(Count::AtLeastOnce);
    }

    fn push(self, count: Count) {
        self.expectations.borrow_mut().push(Expectation {
            kind: self.kind,
            count,
        });
    }
}
