//! Course gate actions for tables.

use crate::model::{TableState, TicketId};
use brigade_framework::{Seconds, Transition};

#[derive(Debug, Clone)]
pub enum TableAction {
    /// `Idle → Serving(1)`.
    Seat { ticket: TicketId, total_courses: u32 },
    /// `Serving(k) → Eating(k)`.
    StartEating { now: Seconds, duration: Seconds },
    /// Feeds one scaled clock delta into the eating timer.
    Advance(Seconds),
    /// Leaves `Eating(k)`: to `Serving(k + 1)`, or to `Complete` after the last course.
    /// Back to `Serving(k)` when demand was added to course k while it was being eaten.
    FinishEating {
        course_complete: bool,
        order_complete: bool,
    },
    /// Back to `Idle` from any state.
    Clear,
}

/// Results from TableActions - variants match 1:1 with TableAction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableActionResult {
    Seat(Transition<TableState>),
    StartEating(Transition<TableState>),
    /// `true` once the eating timer has run out.
    Advance(bool),
    FinishEating(Transition<TableState>),
    Clear(Transition<TableState>),
}
