//! # Brigade
//!
//! > **A service-state coordination engine for a restaurant kitchen.**
//!
//! Stations cook dishes, the pass holds them while they decay, and tables consume them course
//! by course. Brigade keeps all of that consistent under one variable-speed clock and audits
//! every service for mistakes as it happens.
//!
//! ## Design
//!
//! ### Stores own records, coordinators own membership
//! Dish instances, tickets and tables each live in one
//! [`ResourceStore`](brigade_framework::ResourceStore). Stations and the pass only keep lists of
//! dish IDs, so a dish has exactly one owner at a time: a station, the pass, or nobody once it
//! is served or dead.
//!
//! ### Demand is by type
//! A [`TableOrder`](model::TableOrder) tracks *what* a table still needs per course, never
//! *which* instance will provide it. Any servable dish of the right type satisfies it, which is
//! what makes cross-table reassignment safe.
//!
//! ### Courses are gated
//! Course k + 1 unlocks only after course k is fully served and its eating timer elapsed. See
//! [`gate`].
//!
//! ### Everything is an event
//! Components talk over one [`ServiceBus`](events::ServiceBus). The
//! [`ServiceSystem`] routes each delivery with an exhaustive match and drains the bus before
//! any operation returns, so nothing leaks into the next step.
//!
//! ## Module Tour
//!
//! - [`model`]: plain data (dishes, tickets, tables, orders, mistakes)
//! - [`dishes`], [`tickets`], [`tables`]: `Entity` implementations and their actions
//! - [`station`], [`pass`], [`fulfillment`], [`gate`], [`auditor`]: the coordinators
//! - [`events`]: the event sum type and subscription wiring
//! - [`lifecycle`]: [`ServiceSystem`], the tokio driver and the demo expediter
//! - [`config`], [`error`]: configuration and outer-API errors
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=info BRIGADE_SPEED=20 BRIGADE_SEED=3 cargo run -- config.json catalog.json
//! ```

pub mod auditor;
pub mod config;
pub mod dishes;
pub mod error;
pub mod events;
pub mod fulfillment;
pub mod gate;
pub mod lifecycle;
pub mod model;
pub mod pass;
pub mod station;
pub mod tables;
pub mod tickets;

pub use config::{ConfigError, ServiceConfig};
pub use error::ServiceError;
pub use events::{EventKind, ServiceEvent};
pub use lifecycle::{ReassignOutcome, ServiceSystem};
