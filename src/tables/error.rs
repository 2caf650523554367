//! Error types for tables.

use crate::model::TableId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("Table {0} is already occupied")]
    Occupied(TableId),

    #[error("Cannot seat a ticket without courses at table {0}")]
    NoCourses(TableId),
}
