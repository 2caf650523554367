//! Mistake auditor.
//!
//! Passive: it reads deliveries, deaths and course completions, appends to the
//! [`MistakeLedger`] and announces each entry with `MistakeRecorded`. It never changes or rolls
//! back engine state.

use crate::events::{ServiceBus, ServiceEvent};
use crate::fulfillment::OrderBook;
use crate::model::{
    DishBinding, DishId, Mistake, MistakeKind, MistakeLedger, TableId, TicketId,
};
use crate::tickets::TicketStore;
use brigade_framework::Seconds;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A delivered dish type, as seen by the auditor.
#[derive(Debug, Clone)]
pub struct Delivery<'a> {
    pub table: TableId,
    pub dish: Option<DishId>,
    pub dish_type: &'a str,
    pub course: Option<u32>,
    pub ahead: bool,
    pub at: Seconds,
}

#[derive(Debug, Clone, Default)]
pub struct MistakeAuditor {
    ledger: MistakeLedger,
    checked: HashSet<(TicketId, u32)>,
}

impl MistakeAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &MistakeLedger {
        &self.ledger
    }

    pub fn on_dish_died(
        &mut self,
        dish: DishId,
        dish_type: &str,
        binding: Option<DishBinding>,
        at: Seconds,
        bus: &mut ServiceBus,
    ) {
        let mut mistake = Mistake::new(
            MistakeKind::DeadDish,
            at,
            format!("{dish_type} ({dish}) died on the pass"),
        )
        .with_dish(dish)
        .with_dish_type(dish_type);
        if let Some(binding) = binding {
            mistake = mistake
                .with_ticket(binding.ticket)
                .with_table(binding.table)
                .with_course(binding.course);
        }
        self.record(mistake, bus);
    }

    /// Flags wrong-table and premature deliveries. At most one mistake per delivery.
    pub fn on_dish_delivered(
        &mut self,
        delivery: Delivery<'_>,
        orders: &OrderBook,
        tickets: &TicketStore,
        bus: &mut ServiceBus,
    ) {
        let Some(order) = orders.get(delivery.table) else {
            warn!(table = %delivery.table, "Delivery audit without an order skipped");
            return;
        };
        let base = |kind, description: String| {
            let mistake = Mistake::new(kind, delivery.at, description)
                .with_table(delivery.table)
                .with_ticket(order.ticket)
                .with_dish_type(delivery.dish_type);
            match delivery.dish {
                Some(dish) => mistake.with_dish(dish),
                None => mistake,
            }
        };

        match delivery.course {
            None if !order.wants_type(delivery.dish_type) => {
                let mistake = base(
                    MistakeKind::WrongTable,
                    format!(
                        "{} served to {} which never ordered it",
                        delivery.dish_type, delivery.table
                    ),
                );
                self.record(mistake, bus);
            }
            None => {
                debug!(table = %delivery.table, dish_type = delivery.dish_type, "Extra delivery of an ordered type");
            }
            Some(course) => {
                let locked = tickets
                    .get(order.ticket)
                    .is_some_and(|t| !t.is_course_unlocked(course));
                if delivery.ahead || locked {
                    let mistake = base(
                        MistakeKind::PrematureDish,
                        format!(
                            "{} served to {} for course {} before it was unlocked",
                            delivery.dish_type, delivery.table, course
                        ),
                    )
                    .with_course(course);
                    self.record(mistake, bus);
                }
            }
        }
    }

    pub fn on_course_completed(
        &mut self,
        table: TableId,
        course: u32,
        at: Seconds,
        orders: &OrderBook,
        bus: &mut ServiceBus,
    ) {
        self.check_stagger(table, course, at, orders, bus);
    }

    /// Re-checks every completed course of every order. Courses already checked are skipped,
    /// so repeated sweeps never add entries.
    pub fn audit_completed_courses(&mut self, at: Seconds, orders: &OrderBook, bus: &mut ServiceBus) {
        let mut completed: Vec<(TableId, u32)> = orders
            .iter()
            .flat_map(|order| {
                order
                    .courses
                    .iter()
                    .filter(|c| c.is_complete() && !c.expectations.is_empty())
                    .map(move |c| (order.table, c.number))
            })
            .collect();
        completed.sort();
        for (table, course) in completed {
            self.check_stagger(table, course, at, orders, bus);
        }
    }

    fn check_stagger(
        &mut self,
        table: TableId,
        course: u32,
        at: Seconds,
        orders: &OrderBook,
        bus: &mut ServiceBus,
    ) {
        let Some(order) = orders.get(table) else {
            warn!(%table, "Stagger check without an order skipped");
            return;
        };
        if !order.is_course_complete(course) || !self.checked.insert((order.ticket, course)) {
            return;
        }
        let stamps = order.served_timestamps(course);
        if stamps.len() > 1 {
            let mistake = Mistake::new(
                MistakeKind::StaggeredCourse,
                at,
                format!(
                    "course {course} at {table} arrived in {} separate services",
                    stamps.len()
                ),
            )
            .with_table(table)
            .with_ticket(order.ticket)
            .with_course(course);
            self.record(mistake, bus);
        }
    }

    fn record(&mut self, mistake: Mistake, bus: &mut ServiceBus) {
        warn!(kind = %mistake.kind, at = mistake.at, "{}", mistake.description);
        self.ledger.push(mistake.clone());
        bus.publish(ServiceEvent::MistakeRecorded(mistake));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::wire;
    use crate::model::{CourseOrder, Expectation, TableOrder};

    fn book(served_at: &[Option<Seconds>]) -> OrderBook {
        let mut book = OrderBook::new();
        book.insert(TableOrder {
            table: TableId(1),
            ticket: TicketId(1),
            courses: vec![CourseOrder {
                number: 1,
                expectations: served_at
                    .iter()
                    .map(|at| Expectation {
                        course: 1,
                        dish_type: "soup".into(),
                        served: at.is_some(),
                        served_at: *at,
                    })
                    .collect(),
            }],
        });
        book
    }

    #[test]
    fn same_timestamp_is_not_staggered() {
        let mut auditor = MistakeAuditor::new();
        let mut bus = wire();
        auditor.audit_completed_courses(5.0, &book(&[Some(2.0), Some(2.0)]), &mut bus);
        assert!(auditor.ledger().is_empty());
    }

    #[test]
    fn staggered_course_is_recorded_once() {
        let mut auditor = MistakeAuditor::new();
        let mut bus = wire();
        let orders = book(&[Some(2.0), Some(3.0)]);
        auditor.on_course_completed(TableId(1), 1, 3.0, &orders, &mut bus);
        auditor.audit_completed_courses(4.0, &orders, &mut bus);
        auditor.audit_completed_courses(5.0, &orders, &mut bus);
        assert_eq!(auditor.ledger().count(MistakeKind::StaggeredCourse), 1);
        assert_eq!(bus.pending_len(), 1);
    }

    #[test]
    fn incomplete_course_is_not_checked_yet() {
        let mut auditor = MistakeAuditor::new();
        let mut bus = wire();
        auditor.audit_completed_courses(5.0, &book(&[Some(2.0), None]), &mut bus);
        auditor.audit_completed_courses(6.0, &book(&[Some(2.0), Some(6.0)]), &mut bus);
        assert_eq!(auditor.ledger().count(MistakeKind::StaggeredCourse), 1);
    }
}
