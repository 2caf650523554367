//! Table/course gate.
//!
//! Owns every [`Table`]. A table moves `Serving(k) → Eating(k)` when course k is complete and
//! current, and `Eating(k) → Serving(k + 1)` once the ticket's consumption time has elapsed.
//! Course k + 1 is unlocked on the ticket at that moment and not before. If course k gained
//! demand while it was being eaten, the table returns to `Serving(k)` instead.

use crate::events::{ServiceBus, ServiceEvent};
use crate::fulfillment::OrderBook;
use crate::model::{DishCatalog, Table, TableId, TableState, TicketId};
use crate::tables::{TableAction, TableActionResult, TableStore};
use crate::tickets::{TicketAction, TicketStore};
use brigade_framework::{FrameworkError, Seconds, Transition};
use tracing::{info, warn};

#[derive(Debug)]
pub struct CourseGate {
    tables: TableStore,
}

impl CourseGate {
    pub fn new(tables: TableStore) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TableStore {
        &self.tables
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn seat(
        &mut self,
        table: TableId,
        ticket: TicketId,
        total_courses: u32,
    ) -> Result<(), FrameworkError> {
        self.tables.perform_action(
            table,
            TableAction::Seat {
                ticket,
                total_courses,
            },
            &(),
        )?;
        Ok(())
    }

    pub fn clear(&mut self, table: TableId) -> Result<(), FrameworkError> {
        self.tables.perform_action(table, TableAction::Clear, &())?;
        Ok(())
    }

    /// Starts eating when the table is being served and its current course is complete.
    ///
    /// The completed course need not be the current one: finishing an earlier course that was
    /// reopened by a demand transfer lets the current course proceed.
    pub fn on_course_completed(
        &mut self,
        table: TableId,
        now: Seconds,
        orders: &OrderBook,
        tickets: &TicketStore,
    ) {
        let Some(state) = self.tables.get(table).map(|t| t.state) else {
            warn!(%table, "Course completed for unknown table");
            return;
        };
        let TableState::Serving { course } = state else {
            return;
        };
        if orders.is_course_complete(table, course) {
            self.start_eating(table, now, tickets);
        }
    }

    /// Advances every eating timer; finished timers unlock the next course or complete the ticket.
    pub fn tick(
        &mut self,
        delta: Seconds,
        now: Seconds,
        tickets: &mut TicketStore,
        orders: &OrderBook,
        catalog: &DishCatalog,
        bus: &mut ServiceBus,
    ) {
        for table in self.tables.ids() {
            let finished = matches!(
                self.tables.perform_action(table, TableAction::Advance(delta), &()),
                Ok(TableActionResult::Advance(true))
            );
            if finished {
                self.finish_eating(table, now, tickets, orders, catalog, bus);
            }
        }
    }

    fn finish_eating(
        &mut self,
        table: TableId,
        now: Seconds,
        tickets: &mut TicketStore,
        orders: &OrderBook,
        catalog: &DishCatalog,
        bus: &mut ServiceBus,
    ) {
        let Some(ticket) = self.tables.get(table).and_then(|t| t.ticket) else {
            warn!(%table, "Eating table has no ticket");
            return;
        };
        let Some(TableState::Eating { course: eaten }) = self.tables.get(table).map(|t| t.state)
        else {
            warn!(%table, "Finish eating for a table that is not eating");
            return;
        };
        let action = TableAction::FinishEating {
            course_complete: orders.is_course_complete(table, eaten),
            order_complete: orders.is_complete(table),
        };
        let transition = match self.tables.perform_action(table, action, &()) {
            Ok(TableActionResult::FinishEating(t)) => t,
            Ok(_) => Transition::NoOp,
            Err(e) => {
                warn!(%table, error = %e, "Finish eating failed");
                return;
            }
        };

        match transition {
            Transition::Applied {
                from: TableState::Eating { course: eaten },
                to: TableState::Serving { course },
            } if course == eaten + 1 => {
                if let Err(e) =
                    tickets.perform_action(ticket, TicketAction::UnlockCourse(course), catalog)
                {
                    warn!(%ticket, course, error = %e, "Unlock failed");
                }
                info!(%table, %ticket, course, "Course unlocked");
                bus.publish(ServiceEvent::CourseUnlocked {
                    table,
                    ticket,
                    course,
                    at: now,
                });
                if orders.is_course_complete(table, course) {
                    self.start_eating(table, now, tickets);
                }
            }
            Transition::Applied {
                to: TableState::Complete,
                ..
            } => {
                if let Err(e) = tickets.perform_action(ticket, TicketAction::Complete, catalog) {
                    warn!(%ticket, error = %e, "Ticket completion failed");
                }
                info!(%table, %ticket, "Ticket completed");
                bus.publish(ServiceEvent::TicketCompleted {
                    table,
                    ticket,
                    at: now,
                });
            }
            Transition::Applied { to, .. } => {
                info!(%table, state = ?to, "Course reopened, waiting for added demand");
            }
            Transition::NoOp => {}
        }
    }

    fn start_eating(&mut self, table: TableId, now: Seconds, tickets: &TicketStore) {
        let Some(ticket) = self.tables.get(table).and_then(|t| t.ticket) else {
            warn!(%table, "Serving table has no ticket");
            return;
        };
        let Some(duration) = tickets.get(ticket).map(|t| t.consumption_seconds) else {
            warn!(%table, %ticket, "Ticket missing, eating skipped");
            return;
        };
        match self
            .tables
            .perform_action(table, TableAction::StartEating { now, duration }, &())
        {
            Ok(TableActionResult::StartEating(t)) if t.is_applied() => {
                info!(%table, duration, "Eating started");
            }
            Ok(_) => {}
            Err(e) => warn!(%table, error = %e, "Start eating failed"),
        }
    }
}
