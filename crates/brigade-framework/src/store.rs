//! # Generic Resource Store
//!
//! This module defines the `ResourceStore`, the component that owns every instance of one
//! entity type and routes creation and actions to it. Nothing outside the store holds a
//! mutable reference to a stored entity, so each record has exactly one owner.

use crate::entity::Entity;
use crate::error::FrameworkError;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The generic store that manages a collection of entities.
///
/// # Implementation Details
///
/// The store keeps a `HashMap` from ID to entity, plus the insertion order of the IDs so that
/// iteration is deterministic, and a `u32` counter (`next_id`) for ID generation.
///
/// * **Create**:
///     1. Generates a new ID from the `next_id` counter (incrementing it).
///     2. Calls `T::from_create_params` to instantiate the entity.
///     3. Calls the `on_create` hook with the injected context.
///     4. Inserts the entity and returns the new ID.
///
/// * **Get**: borrows the entity by ID, or `None`.
///
/// * **Action**:
///     1. Looks up the entity (mutable access).
///     2. Calls `handle_action` with the action and context.
///     3. Returns the action's result.
///
/// ```rust
/// use brigade_framework::{Entity, ResourceStore};
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u32 }
/// #[derive(Debug)] struct CounterCreate { start: u32 }
/// #[derive(Debug)] enum CounterAction { Bump }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// impl Entity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: params.start })
///     }
///     fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.value += 1;
///         Ok(self.value)
///     }
/// }
///
/// let mut store = ResourceStore::<Counter>::new();
/// let id = store.create(CounterCreate { start: 1 }, &()).unwrap();
/// assert_eq!(store.perform_action(id, CounterAction::Bump, &()).unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct ResourceStore<T: Entity> {
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: Entity> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ResourceStore<T> {
    /// Creates an empty store whose first ID is `1`.
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    // Extract just the type name (e.g., "Ticket" instead of "brigade::model::ticket::Ticket")
    fn entity_type() -> &'static str {
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    /// Creates a new entity from `params`, running its `on_create` hook with `ctx`.
    pub fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T::Id, FrameworkError> {
        let entity_type = Self::entity_type();
        debug!(entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);

        let mut item = T::from_create_params(id, params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(ctx) {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        self.next_id += 1;
        self.store.insert(id, item);
        self.order.push(id);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.store.get(&id)
    }

    /// Like [`get`](Self::get) but reports a missing record as [`FrameworkError::NotFound`].
    pub fn require(&self, id: T::Id) -> Result<&T, FrameworkError> {
        self.store.get(&id).ok_or_else(|| {
            warn!(entity_type = Self::entity_type(), %id, "Not found");
            FrameworkError::NotFound(id.to_string())
        })
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.store.contains_key(&id)
    }

    /// Runs `action` against the entity with the given ID.
    pub fn perform_action(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = Self::entity_type();
        debug!(entity_type, %id, ?action, "Action");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        item.handle_action(action, ctx).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Action failed");
            FrameworkError::EntityError(Box::new(e))
        })
    }

    /// Iterates entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.store.get(id))
    }

    /// IDs in creation order.
    pub fn ids(&self) -> Vec<T::Id> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
