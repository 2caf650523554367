//! Pure data structures (DTOs). Dish instances, tickets and tables implement the
//! [`Entity`](brigade_framework::Entity) trait in their own modules.

pub mod dish;
pub mod mistake;
pub mod order;
pub mod table;
pub mod ticket;

pub use dish::*;
pub use mistake::*;
pub use order::*;
pub use table::*;
pub use ticket::*;
