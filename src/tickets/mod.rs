//! Ticket construction and course unlocking.

mod actions;
pub mod composer;
pub mod entity;
pub mod error;

pub use actions::*;
pub use composer::TicketComposer;
pub use error::*;

use crate::model::Ticket;
use brigade_framework::ResourceStore;

/// Store owning every ticket of a session.
pub type TicketStore = ResourceStore<Ticket>;

/// Creates an empty ticket store.
pub fn new() -> TicketStore {
    ResourceStore::new()
}
