//! Actions for tickets.

use crate::model::{DishId, TicketStatus};
use brigade_framework::Transition;

#[derive(Debug, Clone)]
pub enum TicketAction {
    /// Records an instance produced for `course`.
    AttachDish { course: u32, dish: DishId },
    /// Forgets an instance that was reassigned to another table.
    DetachDish(DishId),
    /// Flips the unlock flag of a course. Only valid once its predecessor is unlocked.
    UnlockCourse(u32),
    /// Every course has been eaten.
    Complete,
    /// The table was cleared early.
    Abandon,
}

/// Results from TicketActions - variants match 1:1 with TicketAction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TicketActionResult {
    AttachDish(()),
    /// `true` when the instance was attached to this ticket.
    DetachDish(bool),
    /// `true` when the flag actually changed.
    UnlockCourse(bool),
    Complete(Transition<TicketStatus>),
    Abandon(Transition<TicketStatus>),
}
