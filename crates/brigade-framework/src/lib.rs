//! # Brigade Framework
//!
//! Generic building blocks for single-threaded, step-driven coordination engines.
//!
//! ## Why a store per entity type?
//!
//! Each record type (a dish instance, a ticket, a table) gets one [`ResourceStore`] that owns
//! every instance of it. Records are created from a typed DTO, mutated only through typed
//! actions, and read through borrows. Because a store is the sole owner, "which component
//! currently holds this record" is answered by membership lists, never by shared pointers.
//!
//! ## Building blocks
//!
//! - [`Entity`] - contract a record implements: ID, create DTO, actions, context, error
//! - [`ResourceStore`] - owns the records of one type, generates IDs, routes actions
//! - [`Transition`] - explicit "applied" vs "no-op" result for guarded state machines
//! - [`Clock`] - scaled, pausable time source handing out [`Tick`]s
//! - [`EventBus`] - kind-keyed publish/subscribe with re-entrant queueing
//! - [`FrameworkError`] - store-level failures
//! - [`mock`] - [`EventRecorder`](mock::EventRecorder) for asserting emitted events
//! - [`tracing`] - subscriber setup
//!
//! ## Concurrency Model
//!
//! There is none. One owner drives everything from one loop. A step advances the
//! clock, lets components publish, and drains the bus before returning. Consistency comes from
//! ordering inside the step, so no state needs a lock.

pub mod bus;
pub mod clock;
pub mod entity;
pub mod error;
pub mod mock;
pub mod store;
pub mod tracing;
pub mod transition;

pub use bus::{BusEvent, Delivery, EventBus, PassiveListener};
pub use clock::{Clock, Seconds, Tick, MAX_SPEED, MIN_SPEED};
pub use entity::Entity;
pub use error::FrameworkError;
pub use store::ResourceStore;
pub use transition::Transition;
