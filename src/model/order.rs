//! Per-table view of outstanding demand.
//!
//! A [`TableOrder`] is derived from a ticket at seating time. It tracks demand by dish *type*
//! and course, never by dish instance, so any instance of the right type can satisfy it.

use crate::model::{TableId, Ticket, TicketId};
use brigade_framework::Seconds;
use serde::Serialize;

/// One unit of outstanding demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expectation {
    pub course: u32,
    pub dish_type: String,
    pub served: bool,
    pub served_at: Option<Seconds>,
}

impl Expectation {
    pub fn new(course: u32, dish_type: impl Into<String>) -> Self {
        Self {
            course,
            dish_type: dish_type.into(),
            served: false,
            served_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOrder {
    pub number: u32,
    pub expectations: Vec<Expectation>,
}

impl CourseOrder {
    /// True when every expectation in the course has been served.
    pub fn is_complete(&self) -> bool {
        self.expectations.iter().all(|e| e.served)
    }

    pub fn outstanding(&self) -> usize {
        self.expectations.iter().filter(|e| !e.served).count()
    }
}

/// Result of serving one dish type against a table's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillOutcome {
    /// An expectation in `course` was marked served. `ahead` is set when that course is past
    /// the table's current course.
    Matched { course: u32, ahead: bool },
    /// No unserved expectation of the type exists. Nothing changed.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableOrder {
    pub table: TableId,
    pub ticket: TicketId,
    pub courses: Vec<CourseOrder>,
}

impl TableOrder {
    /// Copies each course's dish types into unserved expectations.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        let courses = ticket
            .courses
            .iter()
            .map(|course| CourseOrder {
                number: course.number,
                expectations: course
                    .dish_types
                    .iter()
                    .map(|dish_type| Expectation::new(course.number, dish_type.clone()))
                    .collect(),
            })
            .collect();
        Self {
            table: ticket.table,
            ticket: ticket.id,
            courses,
        }
    }

    pub fn course(&self, number: u32) -> Option<&CourseOrder> {
        self.courses.iter().find(|c| c.number == number)
    }

    /// Marks the first unserved expectation of `dish_type`, in course order, as served at `at`.
    pub fn fulfill(&mut self, dish_type: &str, at: Seconds, current_course: u32) -> FulfillOutcome {
        let slot = self
            .courses
            .iter_mut()
            .flat_map(|course| course.expectations.iter_mut())
            .find(|e| !e.served && e.dish_type == dish_type);
        match slot {
            Some(expectation) => {
                expectation.served = true;
                expectation.served_at = Some(at);
                FulfillOutcome::Matched {
                    course: expectation.course,
                    ahead: expectation.course > current_course,
                }
            }
            None => FulfillOutcome::NoMatch,
        }
    }

    /// True when the order has any expectation of `dish_type`, served or not.
    pub fn wants_type(&self, dish_type: &str) -> bool {
        self.expectations().any(|e| e.dish_type == dish_type)
    }

    pub fn has_unserved(&self, dish_type: &str) -> bool {
        self.expectations()
            .any(|e| !e.served && e.dish_type == dish_type)
    }

    pub fn is_course_complete(&self, number: u32) -> bool {
        self.course(number).is_some_and(CourseOrder::is_complete)
    }

    pub fn is_complete(&self) -> bool {
        self.courses.iter().all(CourseOrder::is_complete)
    }

    pub fn outstanding(&self) -> usize {
        self.courses.iter().map(CourseOrder::outstanding).sum()
    }

    /// Removes the first unserved expectation of `dish_type`, in course order.
    /// Returns the course it was taken from.
    pub fn remove_unserved(&mut self, dish_type: &str) -> Option<u32> {
        for course in self.courses.iter_mut() {
            if let Some(index) = course
                .expectations
                .iter()
                .position(|e| !e.served && e.dish_type == dish_type)
            {
                course.expectations.remove(index);
                return Some(course.number);
            }
        }
        None
    }

    /// Appends an unserved expectation to `course`. Returns false if the course does not exist.
    pub fn add_expectation(&mut self, course: u32, dish_type: impl Into<String>) -> bool {
        match self.courses.iter_mut().find(|c| c.number == course) {
            Some(target) => {
                target.expectations.push(Expectation::new(course, dish_type));
                true
            }
            None => false,
        }
    }

    /// Distinct served timestamps of `course`, in first-served order.
    pub fn served_timestamps(&self, course: u32) -> Vec<Seconds> {
        let mut stamps: Vec<Seconds> = Vec::new();
        if let Some(course) = self.course(course) {
            for at in course.expectations.iter().filter_map(|e| e.served_at) {
                if !stamps.contains(&at) {
                    stamps.push(at);
                }
            }
        }
        stamps
    }

    fn expectations(&self) -> impl Iterator<Item = &Expectation> + '_ {
        self.courses.iter().flat_map(|c| c.expectations.iter())
    }
}
