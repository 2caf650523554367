//! Entity trait implementation for [`Table`].
//!
//! The course pointer only ever moves forward by one, and only out of `Eating`.

use super::actions::{TableAction, TableActionResult};
use super::error::TableError;
use crate::model::{Table, TableCreate, TableId, TableState};
use brigade_framework::{Entity, Transition};
use tracing::debug;

impl Entity for Table {
    type Id = TableId;
    type Create = TableCreate;
    type Action = TableAction;
    type ActionResult = TableActionResult;
    type Context = ();
    type Error = TableError;

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> {
        Ok(Self::new(id, params.capacity))
    }

    fn handle_action(&mut self, action: TableAction, _: &()) -> Result<TableActionResult, TableError> {
        match action {
            TableAction::Seat {
                ticket,
                total_courses,
            } => {
                if self.occupied {
                    return Err(TableError::Occupied(self.id));
                }
                if total_courses == 0 {
                    return Err(TableError::NoCourses(self.id));
                }
                self.occupied = true;
                self.ticket = Some(ticket);
                self.current_course = 1;
                self.total_courses = total_courses;
                Ok(TableActionResult::Seat(
                    self.move_to(TableState::Serving { course: 1 }),
                ))
            }
            TableAction::StartEating { now, duration } => match self.state {
                TableState::Serving { course } => {
                    self.eating_started_at = Some(now);
                    self.eating_elapsed = 0.0;
                    self.eating_seconds = duration;
                    Ok(TableActionResult::StartEating(
                        self.move_to(TableState::Eating { course }),
                    ))
                }
                _ => Ok(TableActionResult::StartEating(self.no_op("start_eating"))),
            },
            TableAction::Advance(delta) => {
                // A zero delta (paused clock) never finishes a timer, even a zero-length one.
                if !self.is_eating() || delta <= 0.0 {
                    return Ok(TableActionResult::Advance(false));
                }
                self.eating_elapsed += delta;
                Ok(TableActionResult::Advance(
                    self.eating_elapsed >= self.eating_seconds,
                ))
            }
            TableAction::FinishEating {
                course_complete,
                order_complete,
            } => {
                let TableState::Eating { course } = self.state else {
                    return Ok(TableActionResult::FinishEating(self.no_op("finish_eating")));
                };
                self.eating_started_at = None;
                self.eating_elapsed = 0.0;
                let next = if !course_complete {
                    // Demand was added to this course while eating; serve it again first.
                    TableState::Serving { course }
                } else if course < self.total_courses {
                    self.current_course = course + 1;
                    TableState::Serving { course: course + 1 }
                } else if order_complete {
                    TableState::Complete
                } else {
                    TableState::Serving { course }
                };
                Ok(TableActionResult::FinishEating(self.move_to(next)))
            }
            TableAction::Clear => {
                let was = self.state;
                *self = Table::new(self.id, self.capacity);
                if was == TableState::Idle {
                    return Ok(TableActionResult::Clear(Transition::NoOp));
                }
                Ok(TableActionResult::Clear(Transition::applied(was, TableState::Idle)))
            }
        }
    }
}

impl Table {
    fn move_to(&mut self, to: TableState) -> Transition<TableState> {
        let from = self.state;
        self.state = to;
        Transition::applied(from, to)
    }

    fn no_op(&self, request: &'static str) -> Transition<TableState> {
        debug!(table = %self.id, state = ?self.state, request, "Ignored table transition");
        Transition::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TicketId;

    fn act(table: &mut Table, action: TableAction) -> TableActionResult {
        table.handle_action(action, &()).unwrap()
    }

    fn finish(course_complete: bool, order_complete: bool) -> TableAction {
        TableAction::FinishEating {
            course_complete,
            order_complete,
        }
    }

    fn seated(total_courses: u32) -> Table {
        let mut table = Table::new(TableId(1), 4);
        act(
            &mut table,
            TableAction::Seat {
                ticket: TicketId(1),
                total_courses,
            },
        );
        table
    }

    #[test]
    fn seating_twice_is_rejected() {
        let mut table = seated(2);
        let err = table
            .handle_action(
                TableAction::Seat {
                    ticket: TicketId(2),
                    total_courses: 1,
                },
                &(),
            )
            .unwrap_err();
        assert_eq!(err, TableError::Occupied(TableId(1)));
    }

    #[test]
    fn pointer_advances_only_after_eating() {
        let mut table = seated(2);
        assert_eq!(
            act(&mut table, finish(true, false)),
            TableActionResult::FinishEating(Transition::NoOp)
        );
        act(&mut table, TableAction::StartEating { now: 1.0, duration: 5.0 });
        assert_eq!(act(&mut table, TableAction::Advance(4.0)), TableActionResult::Advance(false));
        assert_eq!(table.eating_progress(), Some(0.8));
        assert_eq!(act(&mut table, TableAction::Advance(1.0)), TableActionResult::Advance(true));
        act(&mut table, finish(true, false));
        assert_eq!(table.current_course, 2);
        assert_eq!(table.state, TableState::Serving { course: 2 });
    }

    #[test]
    fn last_course_completes_only_with_complete_order() {
        let mut table = seated(1);
        act(&mut table, TableAction::StartEating { now: 0.0, duration: 0.0 });
        act(&mut table, finish(true, false));
        assert_eq!(table.state, TableState::Serving { course: 1 });
        act(&mut table, TableAction::StartEating { now: 0.0, duration: 0.0 });
        act(&mut table, finish(true, true));
        assert!(table.is_complete());
        assert!(matches!(
            act(&mut table, TableAction::Clear),
            TableActionResult::Clear(t) if t.entered(TableState::Idle)
        ));
        assert!(!table.occupied);
    }

    #[test]
    fn reopened_course_keeps_the_pointer() {
        let mut table = seated(2);
        act(&mut table, TableAction::StartEating { now: 0.0, duration: 1.0 });
        act(&mut table, finish(false, false));
        assert_eq!(table.current_course, 1);
        assert_eq!(table.state, TableState::Serving { course: 1 });
    }

    #[test]
    fn zero_delta_never_finishes_a_timer() {
        let mut table = seated(1);
        act(&mut table, TableAction::StartEating { now: 0.0, duration: 0.0 });
        assert_eq!(act(&mut table, TableAction::Advance(0.0)), TableActionResult::Advance(false));
        assert_eq!(act(&mut table, TableAction::Advance(0.1)), TableActionResult::Advance(true));
    }
}
