//! Tables and their course gate state.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Table, TableCreate};
use brigade_framework::{FrameworkError, ResourceStore};

/// Store owning every table of a session.
pub type TableStore = ResourceStore<Table>;

/// Creates `count` idle tables numbered from 1.
pub fn new(count: u32, capacity: u32) -> Result<TableStore, FrameworkError> {
    let mut store = ResourceStore::new();
    for _ in 0..count {
        store.create(TableCreate { capacity }, &())?;
    }
    Ok(store)
}
