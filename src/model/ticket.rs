//! A table's full order, grouped into courses.
//!
//! # Framework
//! [`Ticket`] implements the [`Entity`](brigade_framework::Entity) trait; see
//! [`crate::tickets`] for construction rules and actions.

use crate::model::{DishId, TableId};
use brigade_framework::Seconds;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(pub u32);

impl From<u32> for TicketId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ticket_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Active,
    Completed,
    /// The table was cleared before the ticket completed.
    Abandoned,
}

/// One ordered phase of a ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// 1-based ordinal within the ticket.
    pub number: u32,
    /// Dish types in this course, in ticket order. Repeats are allowed.
    pub dish_types: Vec<String>,
    /// Instances produced for this course, attached after the ticket is stored.
    pub dishes: Vec<DishId>,
    pub unlocked: bool,
}

impl Course {
    pub fn new(number: u32, dish_types: Vec<String>) -> Self {
        Self {
            number,
            dish_types,
            dishes: Vec::new(),
            unlocked: number == 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub table: TableId,
    pub created_at: Seconds,
    pub courses: Vec<Course>,
    /// How long guests spend on each course before the next one unlocks.
    pub consumption_seconds: Seconds,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn course(&self, number: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.number == number)
    }

    pub fn course_count(&self) -> u32 {
        self.courses.len() as u32
    }

    pub fn is_active(&self) -> bool {
        self.status == TicketStatus::Active
    }

    pub fn is_course_unlocked(&self, number: u32) -> bool {
        self.course(number).is_some_and(|c| c.unlocked)
    }

    /// Course holding `dish`, if any.
    pub fn course_of_dish(&self, dish: DishId) -> Option<u32> {
        self.courses
            .iter()
            .find(|c| c.dishes.contains(&dish))
            .map(|c| c.number)
    }

    /// Every dish instance attached to the ticket, course by course.
    pub fn dishes(&self) -> impl Iterator<Item = DishId> + '_ {
        self.courses.iter().flat_map(|c| c.dishes.iter().copied())
    }
}

/// Payload for creating a ticket.
///
/// `courses` lists dish type names per course; empty courses are dropped and the remaining
/// courses are numbered consecutively from 1.
#[derive(Debug, Clone)]
pub struct TicketCreate {
    pub table: TableId,
    pub created_at: Seconds,
    pub courses: Vec<Vec<String>>,
    pub consumption_seconds: Seconds,
}
