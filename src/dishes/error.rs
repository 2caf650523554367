//! Error types for dish instances.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    /// The dish name is not in the catalog.
    #[error("Unknown dish: {0}")]
    UnknownDish(String),

    /// The catalog entry carries a duration the timers cannot use.
    #[error("Dish '{dish}' has an invalid definition: {reason}")]
    InvalidDefinition { dish: String, reason: String },
}
