//! Entity trait implementation for [`Ticket`].
//!
//! Empty courses are dropped at construction and the remaining ones are numbered from 1.
//! Course 1 starts unlocked; every later course is unlocked only through
//! [`TicketAction::UnlockCourse`], in order.

use super::actions::{TicketAction, TicketActionResult};
use super::error::TicketError;
use crate::model::{Course, DishCatalog, Ticket, TicketCreate, TicketId, TicketStatus};
use brigade_framework::{Entity, Transition};
use tracing::debug;

impl Entity for Ticket {
    type Id = TicketId;
    type Create = TicketCreate;
    type Action = TicketAction;
    type ActionResult = TicketActionResult;
    type Context = DishCatalog;
    type Error = TicketError;

    fn from_create_params(id: TicketId, params: TicketCreate) -> Result<Self, TicketError> {
        if !params.consumption_seconds.is_finite() || params.consumption_seconds < 0.0 {
            return Err(TicketError::InvalidConsumption(params.consumption_seconds));
        }
        let courses: Vec<Course> = params
            .courses
            .into_iter()
            .filter(|types| !types.is_empty())
            .enumerate()
            .map(|(index, types)| Course::new(index as u32 + 1, types))
            .collect();
        if courses.is_empty() {
            return Err(TicketError::NoCourses);
        }
        Ok(Self {
            id,
            table: params.table,
            created_at: params.created_at,
            courses,
            consumption_seconds: params.consumption_seconds,
            status: TicketStatus::Active,
        })
    }

    /// Rejects dish types missing from the catalog.
    fn on_create(&mut self, catalog: &DishCatalog) -> Result<(), TicketError> {
        for course in &self.courses {
            if let Some(unknown) = course.dish_types.iter().find(|t| !catalog.contains(t)) {
                return Err(TicketError::UnknownDish(unknown.clone()));
            }
        }
        Ok(())
    }

    fn handle_action(
        &mut self,
        action: TicketAction,
        _catalog: &DishCatalog,
    ) -> Result<TicketActionResult, TicketError> {
        match action {
            TicketAction::AttachDish { course, dish } => {
                let target = self
                    .courses
                    .iter_mut()
                    .find(|c| c.number == course)
                    .ok_or(TicketError::UnknownCourse(course))?;
                if !target.dishes.contains(&dish) {
                    target.dishes.push(dish);
                }
                Ok(TicketActionResult::AttachDish(()))
            }
            TicketAction::DetachDish(dish) => {
                let mut found = false;
                for course in self.courses.iter_mut() {
                    let before = course.dishes.len();
                    course.dishes.retain(|&d| d != dish);
                    found |= course.dishes.len() != before;
                }
                Ok(TicketActionResult::DetachDish(found))
            }
            TicketAction::UnlockCourse(number) => {
                let predecessor_unlocked = number <= 1 || self.is_course_unlocked(number - 1);
                let course = self
                    .courses
                    .iter_mut()
                    .find(|c| c.number == number)
                    .ok_or(TicketError::UnknownCourse(number))?;
                if course.unlocked || !predecessor_unlocked {
                    debug!(ticket = %self.id, course = number, "Ignored course unlock");
                    return Ok(TicketActionResult::UnlockCourse(false));
                }
                course.unlocked = true;
                Ok(TicketActionResult::UnlockCourse(true))
            }
            TicketAction::Complete => Ok(TicketActionResult::Complete(
                self.finish(TicketStatus::Completed),
            )),
            TicketAction::Abandon => Ok(TicketActionResult::Abandon(
                self.finish(TicketStatus::Abandoned),
            )),
        }
    }
}

impl Ticket {
    fn finish(&mut self, to: TicketStatus) -> Transition<TicketStatus> {
        if self.status != TicketStatus::Active {
            debug!(ticket = %self.id, status = ?self.status, "Ticket already closed");
            return Transition::NoOp;
        }
        let from = self.status;
        self.status = to;
        Transition::applied(from, to)
    }
}
