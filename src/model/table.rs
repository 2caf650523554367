use crate::model::TicketId;
use brigade_framework::Seconds;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Tables. Tables are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(pub u32);

impl From<u32> for TableId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table_{}", self.0)
    }
}

/// Per-table course gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableState {
    /// No ticket seated.
    Idle,
    /// Waiting for every dish of `course` to be served.
    Serving { course: u32 },
    /// Guests are consuming `course`; the next one is still locked.
    Eating { course: u32 },
    /// Every course was eaten.
    Complete,
}

/// A physical table and its course gate.
///
/// # Framework
/// Implements [`Entity`](brigade_framework::Entity); mutated only by the
/// [`CourseGate`](crate::gate::CourseGate).
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub id: TableId,
    /// Largest party the table seats.
    pub capacity: u32,
    pub occupied: bool,
    pub ticket: Option<TicketId>,
    /// 1-based course pointer; 0 while idle.
    pub current_course: u32,
    pub total_courses: u32,
    pub state: TableState,
    pub eating_started_at: Option<Seconds>,
    pub eating_elapsed: Seconds,
    pub eating_seconds: Seconds,
}

impl Table {
    pub fn new(id: TableId, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            occupied: false,
            ticket: None,
            current_course: 0,
            total_courses: 0,
            state: TableState::Idle,
            eating_started_at: None,
            eating_elapsed: 0.0,
            eating_seconds: 0.0,
        }
    }

    pub fn is_eating(&self) -> bool {
        matches!(self.state, TableState::Eating { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.state == TableState::Complete
    }

    /// Fraction of the current eating timer that has elapsed, if eating.
    pub fn eating_progress(&self) -> Option<f64> {
        if !self.is_eating() {
            return None;
        }
        if self.eating_seconds <= 0.0 {
            return Some(1.0);
        }
        Some((self.eating_elapsed / self.eating_seconds).min(1.0))
    }
}

/// Payload for creating a table.
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub capacity: u32,
}
