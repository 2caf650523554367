//! Errors returned by the outer [`ServiceSystem`](crate::ServiceSystem) API.
//!
//! Nothing inside a step returns these; they only report caller misuse.

use crate::config::ConfigError;
use crate::events::EventKind;
use crate::model::{DishId, TableId};
use brigade_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0:?} events cannot be submitted from outside")]
    NotInbound(EventKind),

    #[error("Unknown table: {0}")]
    UnknownTable(TableId),

    #[error("Table {0} is already occupied")]
    TableOccupied(TableId),

    #[error("Party of {party} does not fit {table} (capacity {capacity})")]
    PartyTooLarge {
        table: TableId,
        party: u32,
        capacity: u32,
    },

    #[error("Unknown dish: {0}")]
    UnknownDish(DishId),

    #[error("Unknown dish type: {0}")]
    UnknownDishType(String),

    #[error("Table {0} has no order")]
    NoOrder(TableId),

    #[error("Table {table} has no outstanding demand for '{dish_type}'")]
    NoOutstandingDemand { table: TableId, dish_type: String },

    #[error(transparent)]
    Store(#[from] FrameworkError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
