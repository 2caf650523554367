//! Error types for tickets.

use brigade_framework::Seconds;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketError {
    #[error("Unknown dish type: {0}")]
    UnknownDish(String),

    /// Every requested course was empty.
    #[error("Ticket has no courses")]
    NoCourses,

    #[error("Invalid consumption duration: {0}")]
    InvalidConsumption(Seconds),

    #[error("Ticket has no course {0}")]
    UnknownCourse(u32),
}
