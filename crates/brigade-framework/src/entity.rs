//! # Entity Trait
//!
//! The `Entity` trait defines the contract that every stateful record (dish instance,
//! ticket, table, …) implements to be managed by the generic [`ResourceStore`](crate::ResourceStore).
//! It specifies associated types for IDs, creation DTOs, actions, context and errors, and
//! provides the lifecycle hooks (`on_create`, `handle_action`). Implementing it gives the
//! store a uniform Create + Get + Action API for any domain model.
//!
//! # Architecture Note
//! We use "Associated Types" (type Id, type Create, etc.) to enforce type safety.
//! A `Ticket` requires a `TicketCreate` payload, and you can't accidentally hand it
//! a `DishCreate` payload. The compiler rules that class of bugs out entirely.
//!
//! # Provided Methods (Hooks)
//! [`Entity::on_create`] has a default implementation that does nothing (`Ok(())`).
//! Override it when creation needs the injected context (e.g. resolving reference data).

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a `ResourceStore`.
///
/// # Context
/// `Context` is injected into every hook. It carries the read-only collaborators an
/// entity needs (a reference-data catalog, for instance) without the entity holding
/// on to them. Use `()` if no dependencies are needed.
pub trait Entity: Clone + Debug + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Copy + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Debug;

    /// Enum representing entity-specific operations (e.g. `Fire`, `UnlockCourse`).
    type Action: Debug;

    /// The result type returned by actions.
    type ActionResult: Debug;

    /// The collaborators injected into hooks.
    type Context;

    /// The error type for this entity.
    ///
    /// One error enum per entity rather than one per action: callers match on a single
    /// type, at the cost of some actions nominally being able to return variants they never do.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its ID and payload.
    /// This is called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called immediately after the entity is constructed, before it is stored.
    /// Returning an error discards the entity.
    fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
