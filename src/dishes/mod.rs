//! Dish instance lifecycle: firing, cooking, decay on the pass and service.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::DishInstance;
use brigade_framework::ResourceStore;

/// Store owning every dish instance of a session.
pub type DishStore = ResourceStore<DishInstance>;

/// Creates an empty dish store.
pub fn new() -> DishStore {
    ResourceStore::new()
}
